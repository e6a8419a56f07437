use crate::sut::SutDescription;

/// `<com.example.Calc: int add(int,int)>`
pub fn method_signature(sut: &SutDescription) -> String {
    format!(
        "<{}: {} {}({})>",
        sut.target.class,
        sut.target.return_type,
        sut.target.method,
        sut.param_types()
    )
}

/// Render `sut.config`. `deps_classpath` is already rewritten to container paths.
pub fn render(sut: &SutDescription, deps_classpath: Option<&str>) -> String {
    let deps_heading = if deps_classpath.is_some() {
        "Dependencies"
    } else {
        "No Dependencies"
    };
    let deps_line = deps_classpath
        .map(|cp| format!("DEPS_CLASS_PATH=\"{}\"", cp))
        .unwrap_or_default();

    format!(
        r#"# ============================================================
# SUT configuration (AUTO-GENERATED)
# ============================================================
# Paths should be relative to the root given in the .env file

# Compiled classes
CLASS_PATH="{compiled}"
TEST_CLASS_PATH="{test}"
SOURCE_PATH="{source}"

# {deps_heading}
{deps_line}

TARGET_CLASS="{class}"
FULLY_QUALIFIED_METHOD_SIGNATURE="{signature}"
PROJECT_PREFIXES="{prefixes}"
"#,
        compiled = sut.sut.compiled_root,
        test = sut.sut.test_root,
        source = sut.sut.source_root,
        class = sut.target.class,
        signature = method_signature(sut),
        prefixes = sut.analysis.project_prefixes.join(","),
    )
}
