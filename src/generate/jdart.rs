use crate::sut::SutDescription;

/// Render the JPF property file driving jdart's concolic run. Paths are
/// resolved inside the container's SUT mount.
pub fn render(sut: &SutDescription, container_sut_dir: &str) -> String {
    let root = container_sut_dir.trim_end_matches('/');
    let method = &sut.target.method;

    format!(
        r#"# ============================================================
# AUTO-GENERATED — DO NOT EDIT
# ============================================================
# Compiled classes
classpath={root}/{compiled}

# Class under analysis
target={class}

concolic.method.{method}={class}.{method}({params})
concolic.method={method}

# Generated tests output
jdart.tests.dir={root}/{tests_out}
"#,
        compiled = sut.sut.compiled_root,
        class = sut.target.class,
        params = sut.named_params(),
        tests_out = sut.test_generation.generated_tests_dir_out,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tests::sample_sut;

    #[test]
    fn test_render() {
        let out = render(&sample_sut(), "/sut/");
        assert!(out.contains("classpath=/sut/target/classes\n"));
        assert!(out.contains("target=com.example.Calc\n"));
        assert!(out.contains("concolic.method.add=com.example.Calc.add(a:int,s:java.lang.String)\n"));
        assert!(out.contains("concolic.method=add\n"));
        assert!(out.contains("jdart.tests.dir=/sut/jdart-tests\n"));
    }
}
