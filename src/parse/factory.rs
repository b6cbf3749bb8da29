use crate::parse::go::GoFrontend;
use crate::parse::javascript::JavaScriptFrontend;
use crate::parse::python::PythonFrontend;
use crate::parse::rust::RustFrontend;
use crate::parse::ParseFrontend;
use crate::walk::Language;

static PYTHON: PythonFrontend = PythonFrontend;
static JAVASCRIPT: JavaScriptFrontend = JavaScriptFrontend;
static RUST: RustFrontend = RustFrontend;
static GO: GoFrontend = GoFrontend;

/// Frontend for a language, or None for unsupported files.
///
/// JavaScript and TypeScript share one frontend.
pub fn frontend_for(lang: Language) -> Option<&'static dyn ParseFrontend> {
    match lang {
        Language::Python => Some(&PYTHON),
        Language::JavaScript | Language::TypeScript => Some(&JAVASCRIPT),
        Language::Rust => Some(&RUST),
        Language::Go => Some(&GO),
        Language::Other => None,
    }
}
