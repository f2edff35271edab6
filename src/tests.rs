#[cfg(test)]
mod unit_tests {
    use crate::{
        density_for_scale, finalize_jpeg, get_chrome_args, normalize_url, output_path, plan_line,
        read_jfif_density, sanitize_component, set_jfif_density, validate_url, BatchRunner,
        BatchSummary, CaptureError, Cli, Config, DeviceProfile, LinePlan, DEFAULT_USER_AGENT,
    };
    use clap::Parser;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.input, Path::new("list.txt"));
        assert_eq!(config.output_dir, Path::new("screenshots"));
        assert_eq!(config.settle_delay, Duration::from_secs(50));
        assert_eq!(config.iteration_delay, Duration::from_secs(1));
        assert!(config.navigation_timeout.is_none());
        assert_eq!(config.jpeg_quality, 100);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let bad_quality = Config {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(matches!(
            bad_quality.validate(),
            Err(CaptureError::Configuration(_))
        ));

        let bad_ua = Config {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert!(bad_ua.validate().is_err());
    }

    #[test]
    fn test_profile_presets() {
        let desktop = DeviceProfile::Desktop.viewport().unwrap();
        assert_eq!((desktop.width, desktop.height), (1920, 1080));
        assert_eq!(desktop.device_scale_factor, 2.0);

        let tablet = DeviceProfile::Tablet.viewport().unwrap();
        assert_eq!((tablet.width, tablet.height), (1366, 1024));

        let mobile = DeviceProfile::Mobile.viewport().unwrap();
        assert_eq!((mobile.width, mobile.height), (430, 932));

        // Full is the sentinel: no viewport override, whole-page capture
        assert!(DeviceProfile::Full.viewport().is_none());
        assert!(DeviceProfile::Full.full_page());
        assert!(!DeviceProfile::Desktop.full_page());
        assert_eq!(DeviceProfile::Full.device_scale_factor(), 2.0);
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(DeviceProfile::Full.as_str(), "full");
        assert_eq!(DeviceProfile::Desktop.as_str(), "desktop");
        assert_eq!(DeviceProfile::Tablet.as_str(), "tablet");
        assert_eq!(DeviceProfile::Mobile.to_string(), "mobile");
    }

    #[test]
    fn test_cli_rejects_unknown_profile() {
        assert!(Cli::try_parse_from(["shotlist", "widescreen"]).is_err());
        assert!(Cli::try_parse_from(["shotlist"]).is_err());
    }

    #[test]
    fn test_cli_parses_profile_and_flags() {
        let cli = Cli::try_parse_from([
            "shotlist",
            "tablet",
            "--input",
            "urls.txt",
            "--settle-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.profile, DeviceProfile::Tablet);
        assert_eq!(cli.input.as_deref(), Some(Path::new("urls.txt")));
        assert_eq!(cli.settle_secs, Some(5));
        assert!(cli.navigation_timeout_secs.is_none());
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(
            normalize_url("https://example.com/a"),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1").is_ok());
        assert!(validate_url("https://not a url ://").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("https://").is_err());
        assert!(matches!(
            validate_url("nonsense"),
            Err(CaptureError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("example.com"), "example_com");
        assert_eq!(sanitize_component("a-b.c/d?e"), "a-b_c_d_e");
        assert_eq!(sanitize_component("Already-Clean123"), "Already-Clean123");
    }

    #[test]
    fn test_output_path_determinism() {
        let url = url::Url::parse("https://example.com").unwrap();
        let path = output_path(&url, DeviceProfile::Desktop, Path::new("screenshots"));
        assert_eq!(path, Path::new("screenshots/example_com_desktop.jpg"));

        // Same pair, same path
        let again = output_path(&url, DeviceProfile::Desktop, Path::new("screenshots"));
        assert_eq!(path, again);

        let deep = url::Url::parse("https://example.com/about/team/").unwrap();
        let path = output_path(&deep, DeviceProfile::Mobile, Path::new("out"));
        assert_eq!(path, Path::new("out/example_com_about_team_mobile.jpg"));
    }

    #[test]
    fn test_density_for_scale() {
        assert_eq!(density_for_scale(Some(2.0)), 144);
        assert_eq!(density_for_scale(Some(1.0)), 72);
        assert_eq!(density_for_scale(None), 72);
    }

    #[test]
    fn test_finalize_jpeg_sets_density() {
        // 4x4 solid-color raster, PNG-encoded like the browser hands back
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            4,
            4,
            image::Rgb([120, 30, 200]),
        ));
        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let jpeg = finalize_jpeg(&png, 100, 144).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(read_jfif_density(&jpeg), Some((1, 144, 144)));

        // Still a decodable JPEG after the density patch
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn test_finalize_rejects_garbage_raster() {
        assert!(matches!(
            finalize_jpeg(b"not a png", 100, 72),
            Err(CaptureError::EncodeFailed(_))
        ));
    }

    #[test]
    fn test_set_jfif_density_inserts_when_missing() {
        // SOI directly followed by SOS, no APP0 at all
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02];
        set_jfif_density(&mut jpeg, 300).unwrap();
        assert_eq!(read_jfif_density(&jpeg), Some((1, 300, 300)));
    }

    #[test]
    fn test_jfif_walk_tolerates_truncated_segment() {
        // APP0 declaring 16 bytes but cut off before the density fields
        let truncated = vec![
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00,
        ];
        assert_eq!(read_jfif_density(&truncated), None);

        let mut jpeg = truncated;
        set_jfif_density(&mut jpeg, 144).unwrap();
        assert_eq!(read_jfif_density(&jpeg), Some((1, 144, 144)));
    }

    #[test]
    fn test_set_jfif_density_rejects_non_jpeg() {
        let mut not_jpeg = vec![0x89, 0x50, 0x4E, 0x47];
        assert!(set_jfif_density(&mut not_jpeg, 72).is_err());
    }

    #[test]
    fn test_chrome_args() {
        let args = get_chrome_args();
        assert!(args.contains(&"--headless".to_string()));
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.contains(&"--disable-gpu".to_string()));

        // User data dirs never collide across launches
        let data_dir = |args: &[String]| {
            args.iter()
                .find(|a| a.starts_with("--user-data-dir="))
                .cloned()
                .unwrap()
        };
        assert_ne!(data_dir(&args), data_dir(&get_chrome_args()));
    }

    #[test]
    fn test_plan_line() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            plan_line("   ", DeviceProfile::Desktop, dir.path()),
            LinePlan::Empty
        ));
        assert!(matches!(
            plan_line("not a url ://", DeviceProfile::Desktop, dir.path()),
            LinePlan::Invalid(_)
        ));

        match plan_line("example.com", DeviceProfile::Desktop, dir.path()) {
            LinePlan::Capture { url, path } => {
                assert_eq!(url.as_str(), "https://example.com/");
                assert_eq!(path, dir.path().join("example_com_desktop.jpg"));
            }
            other => panic!("expected capture plan, got {other:?}"),
        }

        // An existing file is authoritative and flips the plan to a skip
        std::fs::write(dir.path().join("example_com_desktop.jpg"), b"jpg").unwrap();
        assert!(matches!(
            plan_line("example.com", DeviceProfile::Desktop, dir.path()),
            LinePlan::AlreadyExists { .. }
        ));
    }

    #[test]
    fn test_batch_summary_processed() {
        let summary = BatchSummary {
            saved: 2,
            already_existed: 3,
            invalid: 1,
            failed: 1,
        };
        assert_eq!(summary.processed(), 7);
    }

    #[tokio::test]
    async fn test_open_url_list_streams_lines() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("list.txt");
        tokio::fs::write(&list, "example.com\n\nhttp://other.test\n")
            .await
            .unwrap();

        let mut lines = crate::open_url_list(&list).await.unwrap();
        let mut collected = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            collected.push(line);
        }
        assert_eq!(collected, vec!["example.com", "", "http://other.test"]);
    }

    #[tokio::test]
    async fn test_run_skips_without_touching_browser() {
        // Invalid lines and already-captured URLs are resolved purely from
        // the plan, so this run never launches Chrome
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("list.txt");
        tokio::fs::write(&list, "\nnot a url ://\nexample.com\n")
            .await
            .unwrap();

        let out = dir.path().join("shots");
        tokio::fs::create_dir_all(&out).await.unwrap();
        tokio::fs::write(out.join("example_com_desktop.jpg"), b"jpg")
            .await
            .unwrap();

        let config = Config {
            input: list,
            output_dir: out,
            ..Default::default()
        };
        let runner = BatchRunner::new(config, DeviceProfile::Desktop);
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.saved, 0);
        assert_eq!(summary.already_existed, 1);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_run_fails_when_list_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            input: dir.path().join("no-such-list.txt"),
            output_dir: dir.path().join("shots"),
            ..Default::default()
        };
        let runner = BatchRunner::new(config, DeviceProfile::Full);
        assert!(runner.run().await.is_err());
    }
}
