use similar::{ChangeTag, TextDiff};

/// Line diff between two revisions of a changelog's generated content.
#[derive(Debug, Clone)]
pub struct ContentDiff {
    pub diff_lines: Vec<DiffLine>,
}

#[derive(Debug, Clone)]
pub struct DiffLine {
    pub line_type: DiffLineType,
    pub content: String,
    pub old_line_number: Option<usize>,
    pub new_line_number: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineType {
    Context,
    Addition,
    Deletion,
}

impl ContentDiff {
    pub fn between(old_text: &str, new_text: &str) -> Self {
        Self {
            diff_lines: Self::compute_diff(old_text, new_text),
        }
    }

    fn compute_diff(old_text: &str, new_text: &str) -> Vec<DiffLine> {
        let diff = TextDiff::from_lines(old_text, new_text);
        let mut lines = Vec::new();
        let mut old_line_num = 1;
        let mut new_line_num = 1;

        for change in diff.iter_all_changes() {
            let (line_type, old_num, new_num) = match change.tag() {
                ChangeTag::Delete => {
                    let num = old_line_num;
                    old_line_num += 1;
                    (DiffLineType::Deletion, Some(num), None)
                }
                ChangeTag::Insert => {
                    let num = new_line_num;
                    new_line_num += 1;
                    (DiffLineType::Addition, None, Some(num))
                }
                ChangeTag::Equal => {
                    let old_num = old_line_num;
                    let new_num = new_line_num;
                    old_line_num += 1;
                    new_line_num += 1;
                    (DiffLineType::Context, Some(old_num), Some(new_num))
                }
            };

            lines.push(DiffLine {
                line_type,
                content: change.to_string(),
                old_line_number: old_num,
                new_line_number: new_num,
            });
        }

        lines
    }

    pub fn has_changes(&self) -> bool {
        self.diff_lines
            .iter()
            .any(|l| l.line_type != DiffLineType::Context)
    }

    pub fn additions(&self) -> usize {
        self.count(DiffLineType::Addition)
    }

    pub fn deletions(&self) -> usize {
        self.count(DiffLineType::Deletion)
    }

    fn count(&self, line_type: DiffLineType) -> usize {
        self.diff_lines
            .iter()
            .filter(|l| l.line_type == line_type)
            .count()
    }
}

/// Per-file line counts parsed out of a pasted unified git diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub files: Vec<FileStat>,
}

impl DiffStat {
    /// Tolerant parser: text that is not a diff yields an empty stat.
    pub fn parse(git_diff: &str) -> Self {
        let mut files: Vec<FileStat> = Vec::new();
        let mut in_hunk = false;
        let mut lines = git_diff.lines().peekable();

        while let Some(line) = lines.next() {
            let next_is_new_header = lines.peek().is_some_and(|l| l.starts_with("+++ "));

            if let Some(rest) = line.strip_prefix("diff --git ") {
                in_hunk = false;
                let path = rest
                    .split_whitespace()
                    .last()
                    .map(strip_side_prefix)
                    .unwrap_or_default();
                files.push(FileStat::new(path));
            } else if line.starts_with("--- ") && (!in_hunk || next_is_new_header) {
                let path = header_path(line);
                let header_started_file = !in_hunk
                    && files
                        .last()
                        .is_some_and(|f| f.insertions == 0 && f.deletions == 0);
                if !header_started_file {
                    files.push(FileStat::new(path));
                }
                in_hunk = false;
            } else if line.starts_with("+++ ") && !in_hunk {
                let path = header_path(line);
                if let Some(file) = files.last_mut() {
                    if path != "/dev/null" {
                        file.path = path;
                    }
                }
            } else if line.starts_with("@@") {
                in_hunk = true;
            } else if in_hunk {
                if let Some(file) = files.last_mut() {
                    if line.starts_with('+') {
                        file.insertions += 1;
                    } else if line.starts_with('-') {
                        file.deletions += 1;
                    }
                }
            }
        }

        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn insertions(&self) -> usize {
        self.files.iter().map(|f| f.insertions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.files.iter().map(|f| f.deletions).sum()
    }
}

impl FileStat {
    fn new(path: String) -> Self {
        Self {
            path,
            insertions: 0,
            deletions: 0,
        }
    }
}

fn header_path(line: &str) -> String {
    let raw = line[4..].split('\t').next().unwrap_or_default().trim();
    if raw == "/dev/null" {
        raw.to_string()
    } else {
        strip_side_prefix(raw)
    }
}

fn strip_side_prefix(path: &str) -> String {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
        .to_string()
}
