//! List the pages a host would see

use anyhow::{Context, Result};
use std::io::Write;

use crate::Day1;

/// Print every page as `order  platform  title [source]`
pub fn run(day1: &Day1) -> Result<()> {
    let stdout = std::io::stdout();
    write_pages(day1, &mut stdout.lock())
}

fn write_pages(day1: &Day1, out: &mut impl Write) -> Result<()> {
    let pages = day1.load_pages().context("load pages")?;

    writeln!(
        out,
        "Pages for {} ({}):",
        day1.platform,
        pages.len()
    )?;
    for page in &pages {
        writeln!(
            out,
            "  {:>3}  {:<8} {} [{}]",
            page.frontmatter.order,
            page.frontmatter.platform,
            page.title(),
            page.source_file
        )?;
    }

    if !day1.config.final_page.is_empty() {
        writeln!(out, "Final page: {}", day1.config.final_page)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_output() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("day1.yml"), "final_page: done.md\n").unwrap();
        fs::write(dir.path().join("b.md"), "---\norder: 2\n---\n").unwrap();
        fs::write(
            dir.path().join("a.md"),
            "---\ntitle: First\norder: 1\nplatform: linux\n---\n",
        )
        .unwrap();

        let day1 = Day1::new(dir.path()).with_platform("linux");
        let mut out = Vec::new();
        write_pages(&day1, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("Pages for linux (2):"));
        let first = out.find("First [a.md]").unwrap();
        let second = out.find("B [b.md]").unwrap();
        assert!(first < second);
        assert!(out.contains("Final page: done.md"));
    }
}
