//! Terminal rendering for changelogs and their generated markdown.

use changelog_core::diff::{ContentDiff, DiffLineType};
use changelog_core::Changelog;
use colored::{ColoredString, Colorize};

/// One displayable unit of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: usize, text: String },
    Bullet(String),
    Code(Vec<String>),
    Paragraph(String),
    Blank,
}

/// Splits markdown into blocks. Consecutive text lines join into one
/// paragraph, runs of blank lines collapse, and an unclosed code fence runs
/// to the end of the text.
pub fn render_markdown(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut code: Option<Vec<String>> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(lines) = code.as_mut() {
            if trimmed.starts_with("```") {
                blocks.push(Block::Code(std::mem::take(lines)));
                code = None;
            } else {
                lines.push(line.to_string());
            }
            continue;
        }

        if trimmed.starts_with("```") {
            flush_paragraph(&mut paragraph, &mut blocks);
            code = Some(Vec::new());
        } else if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            if !matches!(blocks.last(), Some(Block::Blank) | None) {
                blocks.push(Block::Blank);
            }
        } else if let Some((level, heading)) = heading(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                text: heading.to_string(),
            });
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Bullet(item.trim().to_string()));
        } else {
            paragraph.push(trimmed);
        }
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    if let Some(lines) = code {
        blocks.push(Block::Code(lines));
    }
    if matches!(blocks.last(), Some(Block::Blank)) {
        blocks.pop();
    }

    blocks
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    line[level..].strip_prefix(' ').map(|rest| (level, rest.trim()))
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(paragraph.join(" ")));
        paragraph.clear();
    }
}

pub fn print_markdown(text: &str) {
    for block in render_markdown(text) {
        match block {
            Block::Heading { level: 1, text } => println!("{}", text.bold().cyan()),
            Block::Heading { text, .. } => println!("{}", text.bold()),
            Block::Bullet(item) => println!("  • {}", inline_code(&item)),
            Block::Code(lines) => {
                for line in lines {
                    println!("    {}", line.dimmed());
                }
            }
            Block::Paragraph(text) => println!("{}", inline_code(&text)),
            Block::Blank => println!(),
        }
    }
}

/// Highlights `backtick` spans.
fn inline_code(text: &str) -> String {
    text.split('`')
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                part.yellow().to_string()
            } else {
                part.to_string()
            }
        })
        .collect()
}

pub fn status_label(changelog: &Changelog) -> ColoredString {
    if changelog.published {
        "published".green()
    } else {
        "draft".yellow()
    }
}

/// One-line list entry.
pub fn print_summary(changelog: &Changelog) {
    println!(
        "{} {} {} [{}]",
        changelog.id.to_string().dimmed(),
        format!("v{}", changelog.version).cyan().bold(),
        changelog.title,
        status_label(changelog)
    );
}

pub fn print_changelog(changelog: &Changelog) {
    println!(
        "{} {}",
        "changelog".yellow().bold(),
        changelog.id.to_string().yellow()
    );
    println!("{}: {}", "Version".bold(), changelog.version);
    println!("{}: {}", "Status".bold(), status_label(changelog));
    println!(
        "{}: {}",
        "Created".bold(),
        changelog.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    print_markdown(&changelog.generated_content);
}

pub fn print_content_diff(diff: &ContentDiff) {
    if !diff.has_changes() {
        println!("{}", "Generated content unchanged".dimmed());
        return;
    }

    println!("{}", "━".repeat(80).bright_black());
    for line in &diff.diff_lines {
        let (prefix, color): (&str, fn(&str) -> ColoredString) = match line.line_type {
            DiffLineType::Addition => ("+", |s| s.green()),
            DiffLineType::Deletion => ("-", |s| s.red()),
            DiffLineType::Context => (" ", |s| s.normal()),
        };
        print!("{}", color(&format!("{}{}", prefix, line.content)));
    }
    println!("{}", "━".repeat(80).bright_black());
    println!(
        "{} addition(s), {} deletion(s)",
        diff.additions().to_string().green(),
        diff.deletions().to_string().red()
    );
}
