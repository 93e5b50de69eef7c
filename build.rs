use time::format_description::well_known::Rfc3339;

fn main() {
    println!("cargo:rerun-if-env-changed=SCENE_SCRUB_BUILD_STAMP");

    // An explicit stamp overrides the clock.
    let stamp = std::env::var("SCENE_SCRUB_BUILD_STAMP")
        .ok()
        .or_else(|| {
            let now = time::OffsetDateTime::now_utc().replace_nanosecond(0).ok()?;
            now.format(&Rfc3339).ok()
        })
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=SCENE_SCRUB_BUILD_STAMP={}", stamp);
}
