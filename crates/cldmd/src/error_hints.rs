use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("failed to read input file")
        || haystack.contains("no such file or directory")
    {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("malformed line") {
        push_hint(
            &mut out,
            "Each data line must be `source sign target`, e.g. `Births + Population`.",
        );
        push_hint(
            &mut out,
            "The sign must be exactly `+` or `-`; identifiers allow letters, digits, and `_`.",
        );
    }

    if haystack.contains("no relations found") {
        push_hint(
            &mut out,
            "The file contains only comments or blank lines; add at least one relation.",
        );
    }

    if haystack.contains("is not available on path") {
        push_hint(
            &mut out,
            "Install Graphviz and verify it with `dot -V`.",
        );
        push_hint(
            &mut out,
            "Use `--no-render` to analyze without rendering, or a `.dot` output file to skip the backend.",
        );
    }

    out
}

fn push_hint(hints: &mut Vec<String>, hint: &str) {
    let hint = hint.to_string();
    if !hints.contains(&hint) {
        hints.push(hint);
    }
}
