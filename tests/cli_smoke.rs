use std::path::PathBuf;

fn exe() -> PathBuf {
    let profile_dir = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    std::env::var_os("CARGO_BIN_EXE_celebration")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join(profile_dir);
            p.push(if cfg!(windows) {
                "celebration.exe"
            } else {
                "celebration"
            });
            p
        })
}

#[test]
fn cli_gif_writes_animation_from_config() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let cfg_path = dir.join("scene.json");
    let out_path = dir.join("out.gif");
    let _ = std::fs::remove_file(&out_path);

    let json = r##"
{
  "canvas": { "width": 64, "height": 72 },
  "fps": 10,
  "duration_secs": 1,
  "seed": 7,
  "palette": ["#ff6b6b", [78, 205, 196]],
  "initial_confetti": 20,
  "initial_rockets": 2
}
"##;
    std::fs::write(&cfg_path, json).unwrap();

    let status = std::process::Command::new(exe())
        .args(["gif", "--config"])
        .arg(&cfg_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let bytes = std::fs::read(&out_path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test]
fn cli_rejects_unknown_config_fields() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let cfg_path = dir.join("bad_scene.json");
    std::fs::write(&cfg_path, r#"{ "gravity": 0.5 }"#).unwrap();

    let status = std::process::Command::new(exe())
        .args(["gif", "--config"])
        .arg(&cfg_path)
        .arg("--out")
        .arg(dir.join("never.gif"))
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!dir.join("never.gif").exists());
}

#[test]
fn cli_icons_writes_three_pngs() {
    let dir = PathBuf::from("target").join("cli_smoke").join("images");
    let _ = std::fs::remove_dir_all(&dir);

    let status = std::process::Command::new(exe())
        .args(["icons", "--out-dir"])
        .arg(&dir)
        .status()
        .unwrap();
    assert!(status.success());

    for name in ["stein.png", "papier.png", "schere.png"] {
        let img = image::open(dir.join(name)).unwrap();
        assert_eq!((img.width(), img.height()), (200, 200));
        assert_eq!(img.color(), image::ColorType::Rgb8);
    }
}

#[test]
fn cli_config_prints_reference_defaults() {
    let output = std::process::Command::new(exe())
        .arg("config")
        .output()
        .unwrap();
    assert!(output.status.success());

    let cfg: celebration::CelebrationConfig = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg, celebration::CelebrationConfig::default());
}
