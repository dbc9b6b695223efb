//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A small address book: two contacts and one row without a name.
pub const SAMPLE_BOOK: &str = r#"// <!-- <mdb:mork:z v="1.4"/> -->
< <(a=c)> (80=DisplayName)(81=HomePhone)(82=CellularNumber)(83=Company)
  (84=HomeAddress)(85=HomeZipCode)(86=HomeCity)>
<(90=Jane Doe)(91=555-1234)>
{1:^80 {(k^81:c)(s=9)}
  [1(^80^90)(^81^91)(^83=ACME)(^84=Main St 1)(^85=12345)(^86=Springfield)]
  [2(^80=Anna Schmidt)(^82=+49 170 1234567)]
  [3(^81=000)]}
"#;

/// Path of the binary under test.
pub fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mork-abook"))
}

/// Write `contents` as `abook.mab` into `dir` and return its path.
pub fn write_book(dir: &Path, contents: &[u8]) -> PathBuf {
    let path = dir.join("abook.mab");
    std::fs::write(&path, contents).expect("Failed to write address book");
    path
}

/// Run the binary with `dir` as `$HOME` and a plain, uncolored environment.
pub fn run_in_home(dir: &Path, args: &[&str]) -> Output {
    Command::new(binary())
        .args(args)
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env("MORK_ABOOK_ASCII", "1")
        .env_remove("MORK_ABOOK_BOOK")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute mork-abook binary")
}

/// Run the binary against the book at `book`.
pub fn run_with_book(book: &Path, args: &[&str]) -> Output {
    let home = book.parent().expect("book has a parent directory");
    let book = book.to_str().expect("utf-8 temp path");
    let mut full = vec!["--book", book];
    full.extend_from_slice(args);
    run_in_home(home, &full)
}

/// Stdout of `output` as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of `output` as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
