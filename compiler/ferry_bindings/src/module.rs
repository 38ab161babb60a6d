//! Structured host bindings for one native source file.

use rustc_hash::FxHashMap;

use ferry_ir::{ElementKind, ExportedFunction};
use ferry_types::{HostType, TypeTranslator};

use crate::naming::{sanitize_identifier, Namespace, LIBRARY_SUFFIX, RESULT_LOCAL};

/// Suffix of the file recording the loaded library handle.
pub const HANDLE_RECORD_SUFFIX: &str = "_handle.txt";

/// File name of the handle record for a source stem.
pub fn handle_record_name(stem: &str) -> String {
    format!("{stem}{HANDLE_RECORD_SUFFIX}")
}

/// One host parameter of a binding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostParam {
    pub name: String,
    pub host: HostType,
    /// Default literal in host spelling.
    pub default: Option<String>,
}

/// A name bound directly to a boundary symbol of the loaded library.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForeignBinding {
    pub name: String,
    pub symbol: String,
    pub argtypes: Vec<HostType>,
    pub restype: HostType,
}

/// Host function presenting the native signature over a raw binding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProxyBinding {
    pub name: String,
    /// Raw binding the proxy delegates to.
    pub raw: String,
    pub params: Vec<HostParam>,
    pub returns: HostType,
    /// Element kind whose release binding frees the returned buffer.
    pub release: Option<ElementKind>,
}

impl ProxyBinding {
    /// Parameters the proxy converts from a host sequence into a handle.
    pub fn converted_params(&self) -> impl Iterator<Item = (&HostParam, ElementKind)> {
        self.params
            .iter()
            .filter_map(|p| p.host.element_kind().map(|kind| (p, kind)))
    }
}

/// One top-level entry of a binding module.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Scalar-only function, callable as is.
    Direct(ForeignBinding),
    /// Handle-level binding behind a proxy.
    Raw(ForeignBinding),
    /// Public entry point of an array-using function.
    Proxy(ProxyBinding),
}

impl Binding {
    pub fn name(&self) -> &str {
        match self {
            Binding::Direct(b) | Binding::Raw(b) => &b.name,
            Binding::Proxy(p) => &p.name,
        }
    }

    /// Whether callers should use this binding.
    pub fn is_public(&self) -> bool {
        !matches!(self, Binding::Raw(_))
    }
}

/// Host bindings for every exported function of one source file.
///
/// Functions map to bindings in source order: a `Direct` binding for
/// scalar-only functions, a `Raw` binding followed by its `Proxy` otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingModule {
    library_ident: String,
    artifact: String,
    handle_record: String,
    bindings: Vec<Binding>,
    index: FxHashMap<String, usize>,
    release_kinds: Vec<ElementKind>,
    handle_kinds: Vec<ElementKind>,
}

impl BindingModule {
    /// Binding bound under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.index.get(name).map(|&i| &self.bindings[i])
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Public entry points, one per exported function.
    pub fn public_bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(|b| b.is_public())
    }

    /// Module-level name of the loaded library instance.
    pub fn library_ident(&self) -> &str {
        &self.library_ident
    }

    /// Importable module name (the library identifier).
    pub fn module_name(&self) -> &str {
        &self.library_ident
    }

    /// File name of the module.
    pub fn file_name(&self) -> String {
        format!("{}.py", self.library_ident)
    }

    /// Artifact file name the module loads, relative to itself.
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Handle record file name, relative to the module.
    pub fn handle_record(&self) -> &str {
        &self.handle_record
    }

    /// Kinds whose returned buffers proxies release, in kind order.
    pub fn release_kinds(&self) -> &[ElementKind] {
        &self.release_kinds
    }

    /// Kinds needing a handle class, in kind order.
    pub fn handle_kinds(&self) -> &[ElementKind] {
        &self.handle_kinds
    }
}

/// Assemble host bindings for `functions`, exported from the library
/// `artifact` built from the source file with stem `stem`.
#[tracing::instrument(level = "debug", skip(functions), fields(functions = functions.len()))]
pub fn assemble(stem: &str, artifact: &str, functions: &[ExportedFunction]) -> BindingModule {
    let mut ns = Namespace::new();
    for kind in ElementKind::all() {
        ns.claim(kind.handle_class());
        ns.claim(kind.release_symbol());
    }
    let native_names: Vec<&str> = functions.iter().map(ExportedFunction::name).collect();
    let public_names = ns.claim_distinct(&native_names, "_");
    for (native, public) in native_names.iter().zip(&public_names) {
        if *native != public.as_str() {
            tracing::warn!(
                function = %native,
                binding = %public,
                "name is reserved in the host module, binding renamed"
            );
        }
    }

    let library_ident = ns.prefer(&sanitize_identifier(stem), LIBRARY_SUFFIX);
    if library_ident != sanitize_identifier(stem) {
        tracing::debug!(%library_ident, "stem is taken, library renamed");
    }

    let mut bindings = Vec::with_capacity(functions.len() * 2);
    let mut release_kinds = Vec::new();
    let mut handle_kinds = Vec::new();

    for (function, public) in functions.iter().zip(public_names) {
        let params: Vec<HostParam> = function
            .params()
            .iter()
            .map(|p| HostParam {
                name: p.name.clone(),
                host: TypeTranslator::to_host(&p.ty),
                default: p.default.as_ref().map(|d| d.host().to_string()),
            })
            .collect();
        let returns = TypeTranslator::to_host(function.return_type());

        if !function.uses_arrays() {
            bindings.push(Binding::Direct(ForeignBinding {
                name: public,
                symbol: function.symbol(),
                argtypes: params.into_iter().map(|p| p.host).collect(),
                restype: returns,
            }));
            continue;
        }

        handle_kinds.extend(params.iter().filter_map(|p| p.host.element_kind()));
        handle_kinds.extend(returns.element_kind());

        let raw = ns.fresh(&public, "_");
        let params = proxy_params(&public, &raw, params);
        bindings.push(Binding::Raw(ForeignBinding {
            name: raw.clone(),
            symbol: function.symbol(),
            argtypes: params.iter().map(|p| p.host.raw()).collect(),
            restype: returns.raw(),
        }));

        let release = if function.return_is_array() {
            returns.element_kind()
        } else {
            None
        };
        release_kinds.extend(release);

        bindings.push(Binding::Proxy(ProxyBinding {
            name: public,
            raw,
            params,
            returns,
            release,
        }));
    }

    release_kinds.sort_unstable();
    release_kinds.dedup();
    handle_kinds.sort_unstable();
    handle_kinds.dedup();

    let index = bindings
        .iter()
        .enumerate()
        .map(|(i, b)| (b.name().to_string(), i))
        .collect();

    BindingModule {
        library_ident,
        artifact: artifact.to_string(),
        handle_record: handle_record_name(stem),
        bindings,
        index,
        release_kinds,
        handle_kinds,
    }
}

/// Rename proxy parameters that are keywords or would shadow a name the
/// proxy body refers to: the raw binding, handle classes, release bindings
/// and the result local.
fn proxy_params(proxy: &str, raw: &str, mut params: Vec<HostParam>) -> Vec<HostParam> {
    let mut scope = Namespace::keywords_only();
    scope.claim(raw);
    scope.claim(RESULT_LOCAL);
    for kind in ElementKind::all() {
        scope.claim(kind.handle_class());
        scope.claim(kind.release_symbol());
    }

    let native: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    let renamed = scope.claim_distinct(&native, "_");
    for (param, name) in params.iter_mut().zip(renamed) {
        if param.name != name {
            tracing::warn!(
                %proxy,
                parameter = %param.name,
                renamed = %name,
                "parameter name is reserved in the proxy, renamed"
            );
            param.name = name;
        }
    }
    params
}
