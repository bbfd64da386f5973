fn main() {
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    let icon_path = "../assets/everybar.ico";
    if std::path::Path::new(icon_path).exists() {
        let mut res = winres::WindowsResource::new();
        res.set_icon(icon_path);
        res.compile().expect("failed to compile Windows resources");
        return;
    }

    let release = std::env::var("PROFILE")
        .map(|profile| profile == "release")
        .unwrap_or(false);
    if release && !missing_icon_allowed() {
        panic!("missing Windows icon for release build: {icon_path}. Add apps/assets/everybar.ico");
    }
    println!("cargo:warning=everybar-core: no icon at {icon_path}; building without an embedded one");
}

fn missing_icon_allowed() -> bool {
    std::env::var("EVERYBAR_ALLOW_MISSING_ICON")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
