//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use assert_cmd::prelude::*;
    use std::env;
    use std::fs;
    use std::process::Command;

    #[test]
    fn print_help_information() {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd.arg("--help").output().unwrap();

        // STDOUT should contain the flags
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("--html <PATH>"));
        assert!(stdout.contains("--assets"));

        // Exit code should be 0
        out.assert().code(0);
    }

    #[test]
    fn print_version() {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd.arg("--version").output().unwrap();

        // STDOUT should contain program name and version
        assert_eq!(
            String::from_utf8_lossy(&out.stdout),
            format!("{} {}\n", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        );

        // Exit code should be 0
        out.assert().code(0);
    }

    #[test]
    fn insert_assets_into_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("index.html");
        let output = dir.path().join("dist").join("index.html");
        fs::write(&input, "<html><head></head><body></body></html>").unwrap();

        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd
            .arg(format!("--html={}", input.display()))
            .arg("--out")
            .arg(&output)
            .arg("--roots")
            .arg(dir.path())
            .arg("--assets")
            .arg(dir.path().join("style.css"))
            .arg(dir.path().join("app.mjs"))
            .arg(dir.path().join("app.js"))
            .output()
            .unwrap();

        // STDERR should be empty
        assert_eq!(String::from_utf8_lossy(&out.stderr), "");

        // Exit code should be 0
        out.assert().code(0);

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<link rel=\"stylesheet\" href=\"../style.css?v="));
        assert!(html.contains("<script type=\"module\" src=\"../app.mjs?v="));
        assert!(html.contains("<script nomodule=\"\" src=\"../app.js?v="));
    }

    #[test]
    fn equals_syntax_and_dash_prefixed_assets() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("index.html");
        let output = dir.path().join("index.out.html");
        fs::write(&input, "<html><head></head><body></body></html>").unwrap();

        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd
            .arg(format!("--roots={}", dir.path().display()))
            .arg(format!("--assets={}", dir.path().join("style.css").display()))
            .arg(dir.path().join("-legacy.js"))
            .arg("--html")
            .arg(&input)
            .arg("--out")
            .arg(&output)
            .output()
            .unwrap();

        // Exit code should be 0
        out.assert().code(0);

        assert_eq!(
            fs::read_to_string(&output)
                .unwrap()
                .split("?v=")
                .map(|part| part.trim_start_matches(|c: char| c.is_ascii_digit()))
                .collect::<Vec<_>>()
                .join("?v="),
            "<html><head><link rel=\"stylesheet\" href=\"./style.css?v=\"></head>\
             <body><script src=\"./-legacy.js?v=\"></script></body></html>"
        );
    }

    #[test]
    fn verbose_logs_to_stderr_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("index.html");
        let output = dir.path().join("index.out.html");
        fs::write(&input, "<html><head></head><body></body></html>").unwrap();

        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd
            .arg("--verbose")
            .arg("--html")
            .arg(&input)
            .arg("--out")
            .arg(&output)
            .arg("--assets")
            .arg("https://cdn.example.com/lib.js")
            .output()
            .unwrap();

        // STDOUT should be empty
        assert_eq!(String::from_utf8_lossy(&out.stdout), "");

        // STDERR should contain diagnostics
        assert!(String::from_utf8_lossy(&out.stderr).contains("https://cdn.example.com/lib.js"));

        // Exit code should be 0
        out.assert().code(0);

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "<html><head></head><body><script src=\"https://cdn.example.com/lib.js\"></script></body></html>"
        );
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use assert_cmd::prelude::*;
    use std::env;
    use std::fs;
    use std::process::Command;

    #[test]
    fn missing_out_flag() {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd.arg("--html").arg("index.html").output().unwrap();

        // STDERR should name the missing flag
        assert!(String::from_utf8_lossy(&out.stderr).contains("--out"));

        // Exit code should be 1
        out.assert().code(1);
    }

    #[test]
    fn unknown_flag() {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd
            .args(["--html", "index.html", "--out", "out.html", "--inline"])
            .output()
            .unwrap();

        // STDERR should name the offending token
        assert!(String::from_utf8_lossy(&out.stderr).contains("--inline"));

        // Exit code should be 1
        out.assert().code(1);
    }

    #[test]
    fn strict_rejects_unknown_asset() {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd
            .args([
                "--strict", "--html", "index.html", "--out", "out.html", "--assets", "logo.png",
            ])
            .output()
            .unwrap();

        // STDERR should list the unknown asset
        assert!(String::from_utf8_lossy(&out.stderr).contains("logo.png"));

        // Exit code should be 1
        out.assert().code(1);
    }

    #[test]
    fn missing_body_element() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("index.html");
        let output = dir.path().join("out.html");
        fs::write(&input, "<html><head></head></html>").unwrap();

        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        let out = cmd
            .arg("--html")
            .arg(&input)
            .arg("--out")
            .arg(&output)
            .output()
            .unwrap();

        // STDERR should mention the missing element
        assert!(String::from_utf8_lossy(&out.stderr).contains("<body>"));

        // Exit code should be 1
        out.assert().code(1);

        // Nothing should be written
        assert!(!output.exists());
    }
}
