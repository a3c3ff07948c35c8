//! Integration tests for the `rvn` binary.
//!
//! These tests run the real binary against Ravenfiles in a temporary
//! directory tree, with a real `bash` evaluating the definitions. The
//! environment is cleared so the user's own config and PATH never leak in.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

// =============================================================================
// Test Fixtures
// =============================================================================

/// A home directory with a root boundary and an isolated config dir.
struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(temp.path().join("root")).unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        Self { temp }
    }

    fn root(&self) -> PathBuf {
        self.temp.path().join("root")
    }

    /// Path relative to the root boundary.
    fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.root().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write a file relative to the root boundary.
    fn write(&self, rel: &str, contents: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn marker(&self) -> assert_fs::fixture::ChildPath {
        self.temp.child("config/raven/advised")
    }

    /// `rvn` running in `rel` under the root, with a clean environment.
    fn rvn(&self, rel: &str) -> Command {
        let mut cmd = Command::cargo_bin("rvn").unwrap();
        cmd.env_clear()
            .env("PATH", "/usr/bin:/bin")
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env("RAVEN_ROOT", self.root())
            .arg("--cwd")
            .arg(self.dir(rel));
        cmd
    }
}

const BASICS: &str = "\
# - builds the thing
# uses make under the hood
build() {
    echo \"building $*\"
}

clean() {
    echo cleaning
}

# - exits with the given status
fail() {
    return \"$1\"
}

# - private helper
Helper() {
    echo helped
}

# - calls the private helper
assist() {
    Helper
}
";

// =============================================================================
// Tests: Help
// =============================================================================

#[test]
fn general_help_lists_commands_in_definition_order() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["-q", "help"])
        .assert()
        .success()
        .stdout(
            "Available commands:\n\
             build -- builds the thing\n\
             clean -no help available\n\
             fail -- exits with the given status\n\
             assist -- calls the private helper\n",
        );
}

#[test]
fn help_flag_matches_help_keyword() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["-q", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Available commands:"));
}

#[test]
fn command_help_shows_every_line() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["-q", "help", "build"])
        .assert()
        .success()
        .stdout("build:\n- builds the thing\nuses make under the hood\n");
}

#[test]
fn help_for_unknown_command_exits_two_without_listing() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["help", "bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized command 'bogus'"))
        .stdout(predicate::str::contains("Available commands:").not());
}

// =============================================================================
// Tests: Dispatch
// =============================================================================

#[test]
fn unknown_command_exits_two_with_listing() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .arg("bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized command 'bogus'"))
        .stdout(predicate::str::contains("Available commands:"))
        .stdout(predicate::str::contains("build -"));
}

#[test]
fn missing_command_is_a_usage_error() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing command"));
}

#[test]
fn arguments_reach_the_command() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["-q", "build", "a", "--release", "-v"])
        .assert()
        .success()
        .stdout("building a --release -v\n");
}

#[test]
fn exit_status_passes_through() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox.rvn("").args(["fail", "7"]).assert().code(7);
    sandbox.rvn("").args(["fail", "0"]).assert().code(0);
}

#[test]
fn private_command_cannot_be_dispatched() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .arg("Helper")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("private"))
        .stdout(predicate::str::contains("helped").not());
}

#[test]
fn public_commands_can_call_private_helpers() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["-q", "assist"])
        .assert()
        .success()
        .stdout("helped\n");
}

#[test]
fn underscore_spelling_resolves_hyphenated_command() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", "build-all() {\n    echo all\n}\n");

    sandbox
        .rvn("")
        .args(["-q", "build_all"])
        .assert()
        .success()
        .stdout("all\n");
}

#[test]
fn command_runs_in_the_working_directory() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", "where() {\n    basename \"$PWD\"\n}\n");

    sandbox
        .rvn("deep/leaf")
        .args(["-q", "where"])
        .assert()
        .success()
        .stdout("leaf\n");
}

// =============================================================================
// Tests: Overlay
// =============================================================================

#[test]
fn deeper_ravenfile_overrides_binding_and_help() {
    let sandbox = Sandbox::new();
    sandbox.write(
        "Ravenfile",
        "# - builds the thing\nbuild() {\n    echo slow\n}\n",
    );
    sandbox.write(
        "proj/Ravenfile.local",
        "# - builds it faster\nbuild() {\n    echo fast\n}\n",
    );

    sandbox
        .rvn("proj")
        .args(["-q", "help"])
        .assert()
        .success()
        .stdout("Available commands:\nbuild -- builds it faster\n");

    sandbox
        .rvn("proj")
        .args(["-q", "build"])
        .assert()
        .success()
        .stdout("fast\n");

    // Above the override only the root definition applies.
    sandbox
        .rvn("")
        .args(["-q", "build"])
        .assert()
        .success()
        .stdout("slow\n");
}

#[test]
fn top_level_statements_share_one_environment() {
    let sandbox = Sandbox::new();
    sandbox.write(
        "Ravenfile",
        "GREETING=hello\ngreet() {\n    echo \"$GREETING $TARGET\"\n}\n",
    );
    sandbox.write("proj/Ravenfile", "TARGET=proj\n");

    sandbox
        .rvn("proj")
        .args(["-q", "greet"])
        .assert()
        .success()
        .stdout("hello proj\n");
}

#[test]
fn broken_ravenfile_aborts_with_a_clear_message() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);
    sandbox.write("proj/Ravenfile", "oops() {\n    if then\n");

    sandbox
        .rvn("proj")
        .args(["-q", "build"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to load"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn working_directory_outside_root_is_rejected() {
    let sandbox = Sandbox::new();
    let elsewhere = TempDir::new().unwrap();

    Command::cargo_bin("rvn")
        .unwrap()
        .env_clear()
        .env("PATH", "/usr/bin:/bin")
        .env("HOME", sandbox.temp.path())
        .env("XDG_CONFIG_HOME", sandbox.temp.path().join("config"))
        .env("RAVEN_ROOT", sandbox.root())
        .arg("--cwd")
        .arg(elsewhere.path())
        .arg("help")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not inside the root directory"));
}

// =============================================================================
// Tests: init and the one-time notice
// =============================================================================

#[test]
fn init_creates_a_working_ravenfile() {
    let sandbox = Sandbox::new();

    sandbox
        .rvn("proj")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"))
        .stderr(predicate::str::contains("hint:").not());

    sandbox.marker().assert(predicate::path::missing());

    sandbox
        .rvn("proj")
        .args(["-q", "hello", "raven"])
        .assert()
        .success()
        .stdout("hello raven\n");
}

#[test]
fn path_notice_is_shown_once() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("hint:"));
    sandbox.marker().assert(predicate::path::exists());

    sandbox
        .rvn("")
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("hint:").not());
}

#[test]
fn failed_command_does_not_trigger_notice() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["fail", "3"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("hint:").not());
    sandbox.marker().assert(predicate::path::missing());
}

#[test]
fn config_can_disable_the_notice() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);
    sandbox.temp.child("config/raven").create_dir_all().unwrap();
    sandbox
        .temp
        .child("config/raven/config.toml")
        .write_str("advise = false\n")
        .unwrap();

    sandbox
        .rvn("")
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("hint:").not());
    sandbox.marker().assert(predicate::path::missing());
}

#[test]
fn configured_posix_shell_runs_commands() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);
    sandbox.temp.child("config/raven").create_dir_all().unwrap();
    sandbox
        .temp
        .child("config/raven/config.toml")
        .write_str("shell = \"sh\"\n")
        .unwrap();

    sandbox
        .rvn("")
        .args(["-q", "build", "a b", "it's"])
        .assert()
        .success()
        .stdout("building a b it's\n");
    sandbox.rvn("").args(["fail", "4"]).assert().code(4);
}

#[test]
fn quiet_and_trace_together_are_a_usage_error() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["-q", "--trace", "clean"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("cleaning").not());
}

#[test]
fn trace_reports_loaded_files() {
    let sandbox = Sandbox::new();
    sandbox.write("Ravenfile", BASICS);

    sandbox
        .rvn("")
        .args(["--trace", "clean"])
        .assert()
        .success()
        .stdout("cleaning\n")
        .stderr(predicate::str::contains("[debug] loading"));
}
