//! Python `ctypes` rendering of a `BindingModule`.
//!
//! The rendered module loads the artifact from its own directory, records
//! the library handle, binds every boundary symbol with explicit `argtypes`
//! and `restype`, and defines one proxy function per array-using export.
//! Nothing here evaluates the text; it is written to disk and imported by
//! the host like any other module.

mod emitter;
mod runtime;

use ferry_ir::ElementKind;
use ferry_types::HostType;

use crate::module::{Binding, BindingModule, ForeignBinding, ProxyBinding};
use emitter::PyEmitter;

/// Render `module` as Python source.
///
/// Output depends only on the module, so unchanged input gives
/// byte-identical text.
#[tracing::instrument(level = "debug", skip_all, fields(module = module.module_name()))]
pub fn render_python(module: &BindingModule) -> String {
    let mut out = PyEmitter::with_capacity(4096);
    let library = module.library_ident();

    runtime::emit_imports(&mut out, module.artifact());
    runtime::emit_handle_classes(&mut out, module.handle_kinds());
    runtime::emit_loader(&mut out, library, module.artifact(), module.handle_record());

    for &kind in module.release_kinds() {
        emit_foreign(&mut out, library, &release_binding(kind));
    }

    for binding in module.bindings() {
        match binding {
            Binding::Direct(foreign) | Binding::Raw(foreign) => {
                emit_foreign(&mut out, library, foreign);
            }
            Binding::Proxy(proxy) => emit_proxy(&mut out, proxy),
        }
    }

    out.finish()
}

fn release_binding(kind: ElementKind) -> ForeignBinding {
    let symbol = kind.release_symbol();
    ForeignBinding {
        name: symbol.clone(),
        symbol,
        argtypes: vec![HostType::Handle(kind)],
        restype: HostType::Void,
    }
}

/// `name = lib.symbol` plus its signature.
///
/// An untranslated type has no ctypes spelling; its `argtypes` or
/// `restype` line is left out and ctypes falls back to its defaults.
fn emit_foreign(out: &mut PyEmitter, library: &str, binding: &ForeignBinding) {
    out.line(&format!("{} = {library}.{}", binding.name, binding.symbol));

    if let Some(verbatim) = binding.argtypes.iter().find(|t| is_untranslated(t)) {
        tracing::debug!(binding = %binding.name, ty = %verbatim, "argtypes left to ctypes defaults");
        out.line(&format!("# argtypes omitted: untranslated type `{verbatim}`"));
    } else {
        let argtypes: Vec<String> = binding.argtypes.iter().map(|t| t.ctype().into_owned()).collect();
        out.line(&format!("{}.argtypes = [{}]", binding.name, argtypes.join(", ")));
    }

    if is_untranslated(&binding.restype) {
        out.line(&format!(
            "# restype omitted: untranslated type `{}`",
            binding.restype
        ));
    } else {
        out.line(&format!("{}.restype = {}", binding.name, binding.restype.ctype()));
    }
    out.ensure_blank_lines(1);
}

fn emit_proxy(out: &mut PyEmitter, proxy: &ProxyBinding) {
    let signature: Vec<String> = proxy
        .params
        .iter()
        .map(|p| match &p.default {
            Some(default) => format!("{}={default}", p.name),
            None => p.name.clone(),
        })
        .collect();
    let args: Vec<String> = proxy
        .params
        .iter()
        .map(|p| match p.host.element_kind() {
            Some(kind) => format!("{}.from_sequence({})", kind.handle_class(), p.name),
            None => p.name.clone(),
        })
        .collect();
    let call = format!("{}({})", proxy.raw, args.join(", "));

    out.ensure_blank_lines(2);
    out.line(&format!("def {}({}):", proxy.name, signature.join(", ")));
    out.indent();
    match (&proxy.returns, proxy.release) {
        (_, Some(kind)) => {
            out.line(&format!("_result = {call}"));
            out.line("try:");
            out.indent();
            out.line("return _result.to_array()");
            out.dedent();
            out.line("finally:");
            out.indent();
            out.line(&format!("{}(_result)", kind.release_symbol()));
            out.dedent();
        }
        (HostType::Void, None) => out.line(&call),
        (returns, None) if returns.element_kind().is_some() => {
            out.line(&format!("return {call}.to_array()"));
        }
        (_, None) => out.line(&format!("return {call}")),
    }
    out.dedent();
    out.ensure_blank_lines(2);
}

fn is_untranslated(ty: &HostType) -> bool {
    matches!(ty, HostType::Verbatim(_))
}

#[cfg(test)]
mod tests;
