//! Fake tool scripts for driving the step catalog without a real toolchain.
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A project directory plus a directory of fake tools to use as PATH.
pub struct Sandbox {
    pub project: TempDir,
    pub bin: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.project.path()
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.bin.path().to_path_buf()
    }

    pub fn write_source(&self, name: &str, content: &str) -> &Self {
        fs::write(self.root().join(name), content).unwrap();
        self
    }

    pub fn write_config(&self, yaml: &str) -> &Self {
        fs::write(self.root().join(".cxxvet.yml"), yaml).unwrap();
        self
    }

    /// Install an executable `/bin/sh` script named `name`.
    pub fn tool(&self, name: &str, body: &str) -> &Self {
        self.executable(name, &format!("#!/bin/sh\n{}\n", body))
    }

    /// A lint tool whose interpreter does not exist, so it cannot be started.
    pub fn unstartable_lint(&self) -> &Self {
        self.executable("cppcheck", "#!/nonexistent/interpreter\n")
    }

    fn executable(&self, name: &str, content: &str) -> &Self {
        let path = self.bin.path().join(name);
        fs::write(&path, content).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        self
    }

    /// A compiler whose builds produce a program exiting with `run_status`.
    pub fn compiler(&self, name: &str, banner: &str, run_status: i32) -> &Self {
        self.tool(name, &compiler_script(banner, run_status, None))
    }

    /// A compiler that rejects the sources with `status`.
    pub fn broken_compiler(&self, name: &str, banner: &str, status: i32) -> &Self {
        self.tool(
            name,
            &format!(
                "if [ \"$1\" = \"--version\" ]; then echo \"{}\"; exit 0; fi\n\
                 echo \"main.cpp:1:10: error: expected ';' after expression\" >&2\n\
                 exit {}",
                banner, status
            ),
        )
    }

    /// A Clang-flavoured compiler whose analyzer prints `analysis_output` and
    /// writes a `.plist` report beside each source.
    pub fn clang(&self, analysis_output: &str) -> &Self {
        self.tool(
            "clang++",
            &compiler_script("clang version 18.1.3", 0, Some(analysis_output)),
        )
    }

    /// A valgrind look-alike that runs the program and prints `report`.
    pub fn valgrind(&self, report: &str) -> &Self {
        self.tool(
            "valgrind",
            &format!(
                "if [ \"$1\" = \"--version\" ]; then echo valgrind-3.22.0; exit 0; fi\n\
                 \"$2\"\n\
                 echo \"==4242== {}\" >&2\n\
                 exit 0",
                report
            ),
        )
    }

    /// A formatter that appends a line to every file it formats.
    pub fn reformatting_clang_format(&self) -> &Self {
        self.tool(
            "clang-format",
            "case \"$1\" in --version) echo \"clang-format version 18.1.3\"; exit 0;; esac\n\
             if [ \"$2\" = \"--dump-config\" ]; then echo \"BasedOnStyle: Google\"; exit 0; fi\n\
             while IFS= read -r line; do printf '%s\\n' \"$line\"; done < \"$2\"\n\
             printf '// formatted\\n'",
        )
    }

    /// A lint tool exiting with `status`.
    pub fn lint(&self, status: i32) -> &Self {
        self.tool(
            "cppcheck",
            &format!("echo \"main.cpp:2:0: style: unused variable\" >&2\nexit {}", status),
        )
    }
}

fn compiler_script(banner: &str, run_status: i32, analysis_output: Option<&str>) -> String {
    let analysis = match analysis_output {
        Some(text) => format!(
            "for arg in \"$@\"; do\n\
               if [ \"$arg\" = \"--analyze\" ]; then\n\
                 for src in \"$@\"; do\n\
                   case \"$src\" in *.cpp) : > \"${{src%.cpp}}.plist\";; esac\n\
                 done\n\
                 echo \"{}\" >&2; exit 0\n\
               fi\n\
             done\n",
            text
        ),
        None => String::new(),
    };
    format!(
        "if [ \"$1\" = \"--version\" ]; then echo \"{banner}\"; exit 0; fi\n\
         {analysis}\
         out=\"\"\n\
         while [ $# -gt 0 ]; do\n\
           if [ \"$1\" = \"-o\" ]; then out=\"$2\"; shift; fi\n\
           shift\n\
         done\n\
         printf '#!/bin/sh\\necho hello from app\\nexit {run_status}\\n' > \"$out\"\n\
         /bin/chmod +x \"$out\"",
        banner = banner,
        analysis = analysis,
        run_status = run_status
    )
}
