mod push_test;

use assert_fs::prelude::*;
use assert_fs::NamedTempFile;
use clap::Parser;
use kb_testutils::*;

use super::*;

// The file is removed when the returned handle is dropped
fn write_config_file(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new("kubebuild.yml").unwrap();
    file.write_str(contents).unwrap();
    file
}

fn path_str(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}
