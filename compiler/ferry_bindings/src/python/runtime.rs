//! Fixed runtime text shared by every rendered module.

use ferry_ir::ElementKind;

use super::emitter::PyEmitter;
use crate::naming::PRELUDE_NAMES;

/// Base structure class for all handle classes.
const HANDLE_BASE: &[&str] = &[
    "class _ArrayHandle(ctypes.Structure):",
    "    \"\"\"Pointer and length of a contiguous array crossing the boundary.\"\"\"",
    "",
    "    _element = None",
    "    _dtype = None",
    "",
    "    @classmethod",
    "    def from_sequence(cls, values):",
    "        if isinstance(values, cls):",
    "            return values",
    "        if _np is not None and isinstance(values, _np.ndarray):",
    "            values = _np.ascontiguousarray(values, dtype=cls._dtype)",
    "            handle = cls(values.ctypes.data_as(POINTER(cls._element)), values.size)",
    "            handle._keep = values",
    "            return handle",
    "        values = list(values)",
    "        buffer = (cls._element * len(values))(*values)",
    "        handle = cls(ctypes.cast(buffer, POINTER(cls._element)), len(values))",
    "        handle._keep = buffer",
    "        return handle",
    "",
    "    def to_list(self):",
    "        if not self.arr or self.size <= 0:",
    "            return []",
    "        return self.arr[: self.size]",
    "",
    "    def to_array(self):",
    "        if _np is None:",
    "            return self.to_list()",
    "        return _np.array(self.to_list(), dtype=self._dtype)",
];

/// Banner and imports.
pub fn emit_imports(out: &mut PyEmitter, artifact: &str) {
    out.line(&format!("# Generated by ferry for {artifact}. Do not edit."));
    out.blank();
    out.line("import ctypes");
    out.line("import os");

    let from_ctypes: Vec<&str> = PRELUDE_NAMES
        .iter()
        .copied()
        .filter(|name| *name == "POINTER" || name.starts_with("c_"))
        .collect();
    out.line(&format!("from ctypes import {}", from_ctypes.join(", ")));
    out.blank();
    out.line("try:");
    out.line("    import numpy as _np");
    out.line("except ImportError:");
    out.line("    _np = None");
    out.blank();
    out.blank();
}

/// `_ArrayHandle` and one subclass per kind in `kinds`.
pub fn emit_handle_classes(out: &mut PyEmitter, kinds: &[ElementKind]) {
    for line in HANDLE_BASE {
        if line.is_empty() {
            out.blank();
        } else {
            out.line(line);
        }
    }

    for &kind in kinds {
        out.blank();
        out.blank();
        out.line(&format!("class {}(_ArrayHandle):", kind.handle_class()));
        out.indent();
        out.line(&format!("_element = {}", kind.host_ctype()));
        out.line(&format!("_dtype = \"{}\"", kind.dtype()));
        out.line(&format!(
            "_fields_ = [(\"arr\", POINTER({})), (\"size\", c_int)]",
            kind.host_ctype()
        ));
        out.dedent();
    }
    out.blank();
    out.blank();
}

/// Library load next to the module file, then the handle record.
pub fn emit_loader(out: &mut PyEmitter, library: &str, artifact: &str, handle_record: &str) {
    out.line("_here = os.path.dirname(os.path.abspath(__file__))");
    out.line(&format!(
        "{library} = ctypes.CDLL(os.path.join(_here, \"{artifact}\"))"
    ));
    out.blank();
    out.line(&format!(
        "with open(os.path.join(_here, \"{handle_record}\"), \"w\") as _record:"
    ));
    out.indent();
    out.line(&format!("_record.write(str({library}._handle))"));
    out.dedent();
    out.blank();
}
