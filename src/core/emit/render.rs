//! Render a [`BindingRecord`] into the source text of its `_ViewBinding` class.
//!
//! Output is built line by line in a fixed order, so the same record always
//! renders to the same bytes.

use crate::core::collect::{BindingRecord, ListenerMethod};

/// Suffix appended to the owner's simple name to name the generated class.
pub const BINDING_SUFFIX: &str = "_ViewBinding";

/// The binding contract every generated class implements.
pub const BINDER_INTERFACE: &str = "com.viewbind.ViewBinder";

const VIEW_CLASS: &str = "android.view.View";

const INDENT: &str = "    ";

/// Rendered source for one owner class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// Package of the generated class. Empty for the unnamed package.
    pub package: String,
    /// Simple name of the generated class, e.g. `MainActivity_ViewBinding`.
    pub simple_name: String,
    pub text: String,
}

impl GeneratedSource {
    /// Fully qualified name handed to the filer.
    pub fn qualified_name(&self) -> String {
        qualify(&self.package, &self.simple_name)
    }
}

/// Join a package and a simple name, leaving the unnamed package bare.
pub fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{}.{}", package, simple_name)
    }
}

/// Indentation-aware line buffer.
struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `text` and indent what follows.
    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedent, then write `text`.
    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Render the binding class for `record`, placed in `package`.
///
/// `package` must be the package that encloses the owner (for nested owners,
/// the outermost class's package).
pub fn render(record: &BindingRecord<'_>, package: &str) -> GeneratedSource {
    let owner = record.owner.canonical_name();
    let simple_name = format!("{}{}", record.owner.simple_name, BINDING_SUFFIX);
    let mut w = SourceWriter::new();

    w.line("// Generated by viewbind. Do not modify.");
    if !package.is_empty() {
        w.line(&format!("package {};", package));
    }
    w.blank();
    w.line(&format!("import {};", VIEW_CLASS));
    w.line(&format!("import {};", BINDER_INTERFACE));
    w.blank();

    w.open(&format!(
        "public class {} implements ViewBinder<{}> {{",
        simple_name, owner
    ));
    w.line("@Override");
    w.open(&format!("public void bind(final {} target) {{", owner));

    w.line(&format!("target.setContentView({});", record.layout_id));

    for field in &record.view_fields {
        w.line(&format!(
            "target.{} = ({}) target.findViewById({});",
            field.element.simple_name, field.element.declared_type, field.id
        ));
    }

    for method in &record.click_methods {
        render_click_listeners(&mut w, method);
    }

    for method in &record.long_click_methods {
        render_long_click_listeners(&mut w, method);
    }

    w.close("}");
    w.close("}");

    GeneratedSource {
        package: package.to_string(),
        simple_name,
        text: w.finish(),
    }
}

fn render_click_listeners(w: &mut SourceWriter, method: &ListenerMethod<'_>) {
    for id in method.ids {
        w.open(&format!(
            "target.findViewById({}).setOnClickListener(new View.OnClickListener() {{",
            id
        ));
        w.line("@Override");
        w.open("public void onClick(View v) {");
        w.line(&format!("target.{}(v);", method.element.simple_name));
        w.close("}");
        w.close("});");
    }
}

/// Long-click handlers always report the event as consumed.
fn render_long_click_listeners(w: &mut SourceWriter, method: &ListenerMethod<'_>) {
    for id in method.ids {
        w.open(&format!(
            "target.findViewById({}).setOnLongClickListener(new View.OnLongClickListener() {{",
            id
        ));
        w.line("@Override");
        w.open("public boolean onLongClick(View v) {");
        w.line(&format!("target.{}(v);", method.element.simple_name));
        w.line("return true;");
        w.close("}");
        w.close("});");
    }
}
