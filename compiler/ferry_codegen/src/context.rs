//! Output state for one boundary translation unit.
//!
//! Wrappers write through `CodegenContext` and record which element kinds
//! they hand to the host as freshly allocated buffers. The release
//! functions for those kinds are emitted after the last wrapper.

use rustc_hash::FxHashSet;

use ferry_ir::{ElementKind, Platform};

const INDENT: &str = "    ";

/// Buffer, block depth and release requests for one translation unit.
pub struct CodegenContext {
    pub platform: Platform,
    depth: usize,
    out: String,
    releases: FxHashSet<ElementKind>,
}

impl CodegenContext {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            depth: 0,
            out: String::with_capacity(4096),
            releases: FxHashSet::default(),
        }
    }

    /// Write `text` at the current block depth.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `{` and enter the block.
    pub fn open_block(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    /// Leave the block and write `}` followed by `terminator`.
    pub fn close_block(&mut self, terminator: &str) {
        debug_assert!(self.depth > 0, "close_block without open_block");
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("}}{terminator}"));
    }

    /// A wrapper returns a buffer of `kind` that the host must free.
    pub fn request_release(&mut self, kind: ElementKind) {
        self.releases.insert(kind);
    }

    pub fn release_requested(&self, kind: ElementKind) -> bool {
        self.releases.contains(&kind)
    }

    /// The emitted text.
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blocks_nest() {
        let mut ctx = CodegenContext::new(Platform::Linux);
        ctx.line("int f()");
        ctx.open_block();
        ctx.line("for (;;)");
        ctx.open_block();
        ctx.line("break;");
        ctx.close_block("");
        ctx.line("return 0;");
        ctx.close_block("");
        ctx.blank();
        ctx.line("struct s {};");

        assert_eq!(
            ctx.finish(),
            "int f()\n{\n    for (;;)\n    {\n        break;\n    }\n    return 0;\n}\n\nstruct s {};\n"
        );
    }

    #[test]
    fn test_close_block_terminator() {
        let mut ctx = CodegenContext::new(Platform::Linux);
        ctx.line("struct point");
        ctx.open_block();
        ctx.line("int x;");
        ctx.close_block(";");
        assert_eq!(ctx.finish(), "struct point\n{\n    int x;\n};\n");
    }

    #[test]
    fn test_release_requests_are_a_set() {
        let mut ctx = CodegenContext::new(Platform::Windows);
        assert!(!ctx.release_requested(ElementKind::Int64));
        ctx.request_release(ElementKind::Int64);
        ctx.request_release(ElementKind::Int64);
        assert!(ctx.release_requested(ElementKind::Int64));
        assert!(!ctx.release_requested(ElementKind::Bool));
        assert_eq!(ctx.releases.len(), 1);
    }
}
