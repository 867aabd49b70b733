use similar::{ChangeTag, TextDiff};

use crate::source::FileChange;

/// Line statistics over the files a run touched
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffStats {
    pub files_changed: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl DiffStats {
    pub fn add(&mut self, other: &DiffStats) {
        self.files_changed += other.files_changed;
        self.lines_added += other.lines_added;
        self.lines_removed += other.lines_removed;
    }

    pub fn print_summary(&self) {
        println!("\nDiff summary:");
        println!("Files changed: {}", self.files_changed);
        println!("Lines added: {}", self.lines_added);
        println!("Lines removed: {}", self.lines_removed);
    }
}

/// Render one file change as a unified diff with `context_lines` of context.
pub fn render_change(change: &FileChange, context_lines: usize) -> (String, DiffStats) {
    let diff = TextDiff::from_lines(&change.old_content, &change.new_content);
    let mut stats = DiffStats::default();

    for op in diff.iter_all_changes() {
        match op.tag() {
            ChangeTag::Insert => stats.lines_added += 1,
            ChangeTag::Delete => stats.lines_removed += 1,
            ChangeTag::Equal => {}
        }
    }
    if stats.lines_added > 0 || stats.lines_removed > 0 {
        stats.files_changed = 1;
    }

    let path = change.path.display().to_string();
    let mut output = format!("--- {}\n+++ {}\n", path, path);
    output.push_str(&diff.unified_diff().context_radius(context_lines).to_string());

    (output, stats)
}

/// Print the diff of every change and return the combined statistics.
pub fn print_changes<'a>(changes: impl IntoIterator<Item = &'a FileChange>) -> DiffStats {
    let mut total = DiffStats::default();
    for change in changes {
        let (output, stats) = render_change(change, 3);
        if stats.files_changed > 0 {
            print!("{}", output);
        }
        total.add(&stats);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn change(old: &str, new: &str) -> FileChange {
        FileChange {
            path: PathBuf::from("svc/handler.go"),
            old_content: old.to_string(),
            new_content: new.to_string(),
        }
    }

    #[test]
    fn test_render_change_counts_lines() {
        let old = "func f() {}\n";
        let new = "func f() {\n  //func f() \n}\n";
        let (output, stats) = render_change(&change(old, new), 3);

        assert!(output.starts_with("--- svc/handler.go\n+++ svc/handler.go\n"));
        assert!(output.contains("+  //func f() \n"));
        assert!(output.contains("-func f() {}\n"));
        assert_eq!(
            stats,
            DiffStats {
                files_changed: 1,
                lines_added: 3,
                lines_removed: 1,
            }
        );
    }

    #[test]
    fn test_render_change_without_edits() {
        let (_, stats) = render_change(&change("a\n", "a\n"), 3);
        assert_eq!(stats, DiffStats::default());
    }

    #[test]
    fn test_stats_add() {
        let mut total = DiffStats {
            files_changed: 1,
            lines_added: 4,
            lines_removed: 0,
        };
        total.add(&DiffStats {
            files_changed: 1,
            lines_added: 1,
            lines_removed: 2,
        });
        assert_eq!(total.files_changed, 2);
        assert_eq!(total.lines_added, 5);
        assert_eq!(total.lines_removed, 2);
    }
}
