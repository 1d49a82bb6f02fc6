use assert_fs::TempDir;
use assert_fs::prelude::*;
use pipeline_fs::{handle_collision, slugify};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("hello world", "hello-world")]
#[case("  leading and trailing  ", "leading-and-trailing")]
#[case("tabs\tand\nnewlines", "tabs-and-newlines")]
#[case("Café Résumé", "Cafe-Resume")]
#[case("naïve_über.v2", "naive_uber.v2")]
#[case("a -- b", "a-b")]
#[case("--dashes--", "dashes")]
#[case("report (final) [v2]", "report-final-v2")]
#[case("日本語", "file")]
#[case("", "file")]
#[case("!!!", "file")]
fn slugify_cases(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(slugify(input, 60), expected);
}

#[test]
fn slugify_truncates_and_retrims() {
    // Cut lands right after a hyphen, which must not survive
    assert_eq!(slugify("abcd efgh", 5), "abcd");
    assert_eq!(slugify(&"x".repeat(100), 60).len(), 60);
}

#[test]
fn collision_free_target_is_returned_unchanged() {
    let temp = TempDir::new().unwrap();
    let target = temp.child("report_2024.pdf");

    assert_eq!(handle_collision(target.path()), target.path());
}

#[test]
fn collision_appends_letter_before_extension() {
    let temp = TempDir::new().unwrap();
    temp.child("report_2024.pdf").touch().unwrap();

    let free = handle_collision(temp.child("report_2024.pdf").path());
    assert_eq!(free, temp.child("report_2024-a.pdf").path());
    temp.child("report_2024-a.pdf").assert(predicate::path::missing());
    temp.child("report_2024.pdf").assert(predicate::path::exists());
}

#[test]
fn collision_walks_letters_in_order() {
    let temp = TempDir::new().unwrap();
    temp.child("data.csv").touch().unwrap();
    temp.child("data-a.csv").touch().unwrap();
    temp.child("data-b.csv").touch().unwrap();

    let free = handle_collision(temp.child("data.csv").path());
    assert_eq!(free, temp.child("data-c.csv").path());
}

#[test]
fn collision_falls_back_to_numbers_after_z() {
    let temp = TempDir::new().unwrap();
    temp.child("data.csv").touch().unwrap();
    for letter in 'a'..='z' {
        temp.child(format!("data-{letter}.csv")).touch().unwrap();
    }
    temp.child("data-1.csv").touch().unwrap();

    let free = handle_collision(temp.child("data.csv").path());
    assert_eq!(free, temp.child("data-2.csv").path());
}

#[test]
fn collision_without_extension() {
    let temp = TempDir::new().unwrap();
    temp.child("notes").touch().unwrap();

    let free = handle_collision(temp.child("notes").path());
    assert_eq!(free, temp.child("notes-a").path());
}
