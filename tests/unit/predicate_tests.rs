//! Unit tests for node predicates and filter options
#[cfg(test)]
mod tests {
    use gradfs::services::predicate::{
        ALWAYS, BoxedPredicate, NEVER, Predicate, has_extension, is_dir, is_file, name_is,
    };
    use gradfs::{FilterOptions, KindFilter, Node, NodeKind};
    use std::path::PathBuf;

    fn file(path: &str) -> Node {
        Node::new(PathBuf::from(path), NodeKind::File)
    }

    fn dir(path: &str) -> Node {
        Node::new(PathBuf::from(path), NodeKind::Directory)
    }

    #[test]
    fn constant_predicates() {
        assert!(ALWAYS(&file("x")));
        assert!(ALWAYS(&dir("x")));
        assert!(!NEVER(&file("x")));
        assert!(!NEVER(&dir("x")));
    }

    #[test]
    fn kind_predicates() {
        assert!(is_file(&file("a.txt")));
        assert!(!is_file(&dir("a")));
        assert!(is_dir(&dir("a")));
        assert!(!is_dir(&file("a.txt")));
    }

    #[test]
    fn extension_match_ignores_case_and_dot() {
        let rs = has_extension(".RS");
        assert!(rs(&file("src/lib.rs")));
        assert!(rs(&file("BUILD.Rs")));
        assert!(!rs(&file("notes.txt")));
        assert!(!rs(&file("Makefile")));
    }

    #[test]
    fn name_match_is_exact() {
        let target = name_is("target");
        assert!(target(&dir("proj/target")));
        assert!(!target(&dir("proj/targets")));
    }

    #[test]
    fn boxed_predicates_can_be_chosen_at_runtime() {
        let files_only = true;
        let pred: BoxedPredicate = if files_only {
            Box::new(is_file)
        } else {
            Box::new(ALWAYS)
        };
        assert!(pred(&file("a")));
        assert!(!pred(&dir("b")));
    }

    #[test]
    fn filter_options_default_accepts_everything() {
        let opts = FilterOptions::default();
        let yield_filter = opts.yield_filter();
        let descend_filter = opts.descend_filter();

        assert!(yield_filter(&file("a.bin")));
        assert!(yield_filter(&dir("d")));
        assert!(descend_filter(&dir("d")));
    }

    #[test]
    fn filter_options_extensions_only_restrict_files() {
        let opts = FilterOptions {
            extensions: vec!["md".to_string()],
            ..Default::default()
        };
        let yield_filter = opts.yield_filter();

        assert!(yield_filter(&file("README.MD")));
        assert!(!yield_filter(&file("main.rs")));
        assert!(yield_filter(&dir("docs")));
    }

    #[test]
    fn filter_options_kind_and_skip_dirs() {
        let opts = FilterOptions {
            kind: KindFilter::DirsOnly,
            skip_dirs: vec!["target".to_string(), ".git".to_string()],
            ..Default::default()
        };
        let yield_filter = opts.yield_filter();
        let descend_filter = opts.descend_filter();

        assert!(!yield_filter(&file("a.txt")));
        assert!(yield_filter(&dir("src")));
        assert!(!descend_filter(&dir("proj/target")));
        assert!(!descend_filter(&dir("proj/.git")));
        assert!(descend_filter(&dir("proj/src")));
    }

    fn accepted<P: Predicate + ?Sized>(pred: &P, nodes: &[Node]) -> usize {
        nodes.iter().filter(|n| pred.test(n)).count()
    }

    #[test]
    fn every_callable_is_a_predicate() {
        let nodes = [file("a.rs"), file("b.txt"), dir("src")];

        assert_eq!(accepted(&ALWAYS, &nodes), 3);
        assert_eq!(accepted(&NEVER, &nodes), 0);
        assert_eq!(accepted(&is_dir, &nodes), 1);
        assert_eq!(accepted(&has_extension("rs"), &nodes), 1);

        let boxed: BoxedPredicate = Box::new(|n: &Node| n.name() != Some("src"));
        assert_eq!(accepted(&boxed, &nodes), 2);
        assert_eq!(accepted(boxed.as_ref(), &nodes), 2);
    }
}
