fn main() {
    // Windows resource compilation for icon and manifest
    #[cfg(windows)]
    {
        if std::path::Path::new("assets/rosterdesk.ico").exists() {
            let mut res = winres::WindowsResource::new();
            res.set_icon("assets/rosterdesk.ico");
            res.compile().unwrap();
        }
    }
}
