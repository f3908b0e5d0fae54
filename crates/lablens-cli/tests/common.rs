#![allow(dead_code)]

use assert_cmd::Command;
use lablens_testing::TestWorld;

pub fn lablens(world: &TestWorld) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lablens");
    world.configure_command(&mut cmd);
    cmd
}

pub fn sample_world() -> TestWorld {
    TestWorld::new()
        .with_sample_data()
        .expect("Failed to set up sample data")
}
