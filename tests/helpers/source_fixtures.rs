//! Common source code fixtures for tests.

/// `a.lang` of the two-document scenario
pub const DECLARES_FOO: &str = "def foo;\n";

/// `b.lang` of the two-document scenario
pub const USES_FOO: &str = "use foo;\n";

pub const NESTED_SHADOWING: &str = r#"
def shape;
package geometry {
    def shape;
    use shape;
}
use shape;
"#;

pub const TYPED_DEFINITIONS: &str = r#"
package vehicles {
    def engine;
    def car : engine {
        def wheel : engine;
    }
}
def truck : vehicles;
"#;

pub const WITH_SYNTAX_ERROR: &str = r#"
def ok;
def broken
use ok;
"#;
