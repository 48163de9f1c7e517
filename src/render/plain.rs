//! Plain-text dump of a timeline snapshot.
//!
//! Used by `--plain`: one line per render node, no terminal takeover, so the
//! output can be piped or diffed.

use crate::render::ui::layout::{EMPTY_STATE_HINT, EMPTY_STATE_TITLE};
use crate::timeline::{RenderNode, TimelineSnapshot};
use std::io::{self, Write};

/// Write `snapshot` as text, headed by `title` and the visible count
pub fn write_plain<W: Write>(
    out: &mut W,
    title: &str,
    snapshot: &TimelineSnapshot<'_>,
) -> io::Result<()> {
    writeln!(
        out,
        "{title} ({} of {})",
        snapshot.entry_count(),
        snapshot.total
    )?;

    if snapshot.is_empty() {
        writeln!(out)?;
        writeln!(out, "{EMPTY_STATE_TITLE}")?;
        writeln!(out, "{EMPTY_STATE_HINT}")?;
        return Ok(());
    }

    for node in &snapshot.nodes {
        match node {
            RenderNode::EraMarker { label } => {
                writeln!(out)?;
                writeln!(out, "== {label} ==")?;
            }
            RenderNode::Entry(entry) => {
                let theory = entry.theory;
                writeln!(
                    out,
                    "{:<5} {:>10}  {} ({}, {})",
                    entry.lane.as_str(),
                    theory.display_year,
                    theory.title,
                    theory.author,
                    theory.category
                )?;
            }
        }
    }

    Ok(())
}
