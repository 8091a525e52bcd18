use apply_versions_engine::config::Replacement;
use apply_versions_engine::rewriter::rewrite_lines;
use proptest::prelude::*;

fn replacements() -> Vec<Replacement> {
    vec![
        Replacement::new("\t<FileVersion>", "9.9.9.9</FileVersion>\n"),
        Replacement::new("#define MyAppVersion", " \"2.0\"\n"),
        Replacement::new("VersionInfoVersion=", "9.9.9.9\n"),
    ]
}

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 <>/=\"]{0,20}",
        "[a-zA-Z0-9.]{0,8}".prop_map(|s| format!("\t<FileVersion>{s}</FileVersion>")),
        "[0-9.]{0,8}".prop_map(|s| format!("VersionInfoVersion={s}")),
    ]
}

proptest! {
    #[test]
    fn line_count_is_preserved(lines in prop::collection::vec(line(), 0..30)) {
        let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let out = rewrite_lines(&text, &replacements());
        prop_assert_eq!(out.lines, lines.len());
        prop_assert_eq!(out.text.lines().count(), lines.len());
    }

    #[test]
    fn each_line_is_verbatim_or_prefix_plus_suffix(lines in prop::collection::vec(line(), 0..30)) {
        let replacements = replacements();
        let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let out = rewrite_lines(&text, &replacements);

        for (before, after) in text.split_inclusive('\n').zip(out.text.split_inclusive('\n')) {
            match replacements.iter().find(|r| before.starts_with(&r.prefix)) {
                Some(r) => prop_assert_eq!(after, format!("{}{}", r.prefix, r.suffix)),
                None => prop_assert_eq!(after, before),
            }
        }
    }

    #[test]
    fn rewriting_twice_is_stable(lines in prop::collection::vec(line(), 0..30)) {
        let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let once = rewrite_lines(&text, &replacements());
        let twice = rewrite_lines(&once.text, &replacements());
        prop_assert_eq!(once.text, twice.text);
    }
}
