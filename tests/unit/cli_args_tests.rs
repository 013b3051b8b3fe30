//! Unit tests for CLI argument parsing
#[cfg(test)]
mod tests {
    use gradfs::KindFilter;
    use gradfs::cli::args::{Command, parse_args};
    use std::path::PathBuf;

    fn make_args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_walk_with_filters() {
        let argv = make_args(&[
            "gradfs",
            "walk",
            "/tmp/work",
            "--ext",
            "rs",
            "--ext",
            "toml",
            "--skip-dir",
            "target",
            "--files-only",
        ]);

        let parsed = parse_args(&argv).expect("parse walk args");
        let Command::Walk(walk) = parsed.command else {
            panic!("expected walk command");
        };

        assert_eq!(walk.path, "/tmp/work");
        assert_eq!(walk.filter.extensions, vec!["rs", "toml"]);
        assert_eq!(walk.filter.skip_dirs, vec!["target"]);
        assert_eq!(walk.filter.kind, KindFilter::FilesOnly);
        assert!(walk.out.is_none());
        assert!(!walk.json);
    }

    #[test]
    fn parse_walk_with_output_file() {
        let argv = make_args(&["gradfs", "walk", ".", "--out", "files.txt", "--json"]);

        let parsed = parse_args(&argv).expect("parse walk args");
        let Command::Walk(walk) = parsed.command else {
            panic!("expected walk command");
        };

        assert_eq!(walk.out.as_deref(), Some("files.txt"));
        assert!(walk.json);
    }

    #[test]
    fn parse_conflicting_kind_flags() {
        let argv = make_args(&["gradfs", "ls", ".", "--files-only", "--dirs-only"]);

        let err = parse_args(&argv).expect_err("conflicting flags should fail");
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn ls_rejects_skip_dir() {
        let argv = make_args(&["gradfs", "ls", ".", "--skip-dir", "target"]);

        let err = parse_args(&argv).expect_err("ls has no --skip-dir");
        assert_eq!(err, "Unknown option: --skip-dir");
    }

    #[test]
    fn parse_tail_line_count() {
        let argv = make_args(&["gradfs", "tail", "log.txt", "-n", "3"]);

        let parsed = parse_args(&argv).expect("parse tail args");
        let Command::Tail(tail) = parsed.command else {
            panic!("expected tail command");
        };
        assert_eq!(tail.lines, 3);

        let argv = make_args(&["gradfs", "tail", "log.txt"]);
        let Command::Tail(tail) = parse_args(&argv).unwrap().command else {
            panic!("expected tail command");
        };
        assert_eq!(tail.lines, 10);

        let argv = make_args(&["gradfs", "tail", "log.txt", "-n", "many"]);
        assert_eq!(parse_args(&argv).unwrap_err(), "-n must be a number");
    }

    #[test]
    fn parse_clean_save_to_enables_saving() {
        let argv = make_args(&[
            "gradfs",
            "clean",
            "words.txt",
            "--save-to",
            "sorted.txt",
            "--sort",
            "--dedupe",
        ]);

        let parsed = parse_args(&argv).expect("parse clean args");
        let Command::Clean(clean) = parsed.command else {
            panic!("expected clean command");
        };

        assert!(clean.options.save_back);
        assert_eq!(clean.options.save_to, Some(PathBuf::from("sorted.txt")));
        assert!(clean.options.sort);
        assert!(clean.options.dedupe);
        assert!(!clean.options.drop_blank);
    }

    #[test]
    fn parse_cat_flags() {
        let argv = make_args(&["gradfs", "cat", "in.txt", "--strip-both", "--skip-blank"]);

        let Command::Cat(cat) = parse_args(&argv).unwrap().command else {
            panic!("expected cat command");
        };
        assert_eq!(cat.path, "in.txt");
        assert!(cat.strip_both);
        assert!(cat.skip_blank);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse_args(&make_args(&["gradfs"])).unwrap_err(),
            "No command specified"
        );
        assert_eq!(
            parse_args(&make_args(&["gradfs", "scan", "."])).unwrap_err(),
            "Unknown command: scan"
        );
        assert_eq!(
            parse_args(&make_args(&["gradfs", "walk"])).unwrap_err(),
            "Missing required argument: DIR"
        );
        assert_eq!(
            parse_args(&make_args(&["gradfs", "cat"])).unwrap_err(),
            "Missing required argument: FILE"
        );
        assert_eq!(
            parse_args(&make_args(&["gradfs", "walk", ".", "--out"])).unwrap_err(),
            "--out requires a value"
        );
        assert_eq!(
            parse_args(&make_args(&["gradfs", "cat", "a", "b"])).unwrap_err(),
            "Unexpected argument: b"
        );
    }
}
