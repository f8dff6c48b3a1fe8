//! Debug printer.

use core::fmt::{self, Write as _};

use crate::forest::Node;
use crate::kind::NodeKind;

/// Guide drawn for one nesting level.
#[derive(Clone, Copy)]
struct Guide {
    /// Whether the node at this level is the last of its siblings.
    is_last_sibling: bool,
    /// Whether the current line is the first line of the node.
    is_first_line: bool,
}

impl Guide {
    /// Returns the full guide string.
    fn as_str(self) -> &'static str {
        match (self.is_last_sibling, self.is_first_line) {
            (false, true) => "|-- ",
            (false, false) => "|   ",
            (true, true) => "`-- ",
            (true, false) => "    ",
        }
    }

    /// Returns the guide string without trailing whitespaces.
    fn trimmed(self) -> &'static str {
        self.as_str().trim_end()
    }
}

/// Writer that prefixes every line with the guides of the open levels.
struct GuideWriter<'a, 'b> {
    /// Backend formatter.
    fmt: &'b mut fmt::Formatter<'a>,
    /// Whether the next character starts a new line.
    at_line_start: bool,
    /// Guides of the open levels, outermost first.
    guides: Vec<Guide>,
}

impl<'a, 'b> GuideWriter<'a, 'b> {
    /// Creates a new writer.
    fn new(fmt: &'b mut fmt::Formatter<'a>) -> Self {
        Self {
            fmt,
            at_line_start: true,
            guides: Vec::new(),
        }
    }

    /// Starts a new line for a child item.
    ///
    /// This should **not** be called for the root item.
    fn open_item(&mut self, is_last_sibling: bool) -> fmt::Result {
        if !self.at_line_start {
            self.fmt.write_char('\n')?;
            self.at_line_start = true;
        }
        if let Some(guide) = self.guides.last_mut() {
            guide.is_first_line = false;
        }
        self.guides.push(Guide {
            is_last_sibling,
            is_first_line: true,
        });

        Ok(())
    }

    /// Closes the current item.
    ///
    /// Returns `false` if there is no item to close, i.e. the current item is
    /// the root.
    fn close_item(&mut self) -> bool {
        self.guides.pop().is_some()
    }

    /// Writes the guides for a line with the given content.
    fn write_guides(&mut self, content_is_empty: bool) -> fmt::Result {
        let Some((last, init)) = self.guides.split_last() else {
            return Ok(());
        };
        for guide in init {
            self.fmt.write_str(guide.as_str())?;
        }
        if content_is_empty {
            self.fmt.write_str(last.trimmed())
        } else {
            self.fmt.write_str(last.as_str())
        }
    }
}

impl fmt::Write for GuideWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for line in s.split_inclusive('\n') {
            if self.at_line_start {
                self.write_guides(line == "\n")?;
                if let Some(guide) = self.guides.last_mut() {
                    guide.is_first_line = false;
                }
            }
            self.fmt.write_str(line)?;
            self.at_line_start = line.ends_with('\n');
        }

        Ok(())
    }
}

/// Tree printer for debugging.
///
/// Names are rendered with [`NodeKind::name_to_string`]. The output format
/// is not guaranteed to be stable.
///
/// ```text
/// a
/// |-- aa
/// |   `-- aaa
/// `-- ab
/// ```
pub struct DebugPrint<'a, K: NodeKind> {
    /// Root node of the (sub)tree to print.
    node: Node<'a, K>,
}

impl<'a, K: NodeKind> DebugPrint<'a, K> {
    /// Creates a new `DebugPrint` object for the node.
    pub(crate) fn new(node: Node<'a, K>) -> Self {
        Self { node }
    }
}

impl<K: NodeKind> fmt::Display for DebugPrint<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.node.forest().kind();
        let mut writer = GuideWriter::new(f);
        let mut steps = self.node.nodes();

        // The root has no guide.
        steps.next();
        writer.write_str(&kind.name_to_string(self.node.name()))?;

        for step in &mut steps {
            if step.is_leave() {
                if writer.close_item() {
                    continue;
                }
                break;
            }
            let node = step.node;
            writer.open_item(node.next_sibling_id().is_none())?;
            writer.write_str(&kind.name_to_string(node.name()))?;
        }

        Ok(())
    }
}

impl<K: NodeKind> fmt::Debug for DebugPrint<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugPrint")
            .field("node", &self.node)
            .finish()
    }
}
