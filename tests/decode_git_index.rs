use crate::common::command::{
    committed_repository_dir, git_commit, git_stdout, repository_dir, run_dircache_command,
    run_git_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use dircache::areas::index::Index;
use dircache::artifacts::core::Lines;
use dircache::artifacts::index::entry_flags::Stage;
use dircache::artifacts::index::extensions::Signature;
use dircache::artifacts::objects::object_id::ObjectId;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn load_git_index(dir: &TempDir) -> dircache::IndexState {
    Index::new(dir.path().join(".git").join("index"))
        .load()
        .expect("git index should decode")
}

#[rstest]
fn ls_files_matches_git(committed_repository_dir: TempDir) {
    let expected = git_stdout(committed_repository_dir.path(), &["ls-files", "--stage"]);

    run_dircache_command(committed_repository_dir.path(), &["ls-files", "--stage"])
        .assert()
        .success()
        .stdout(expected);

    let expected = git_stdout(committed_repository_dir.path(), &["ls-files"]);
    run_dircache_command(committed_repository_dir.path(), &["ls-files"])
        .assert()
        .success()
        .stdout(expected);
}

#[rstest]
fn git_index_decodes(committed_repository_dir: TempDir) {
    let index = load_git_index(&committed_repository_dir);

    assert_eq!(index.version(), 2);
    assert_eq!(index.len(), 8);
    assert!(!index.has_conflicts());

    let entry = index.entry(b"a/b/3.txt", Stage::Merged).unwrap();
    let expected_oid = git_stdout(committed_repository_dir.path(), &["hash-object", "a/b/3.txt"]);
    assert_eq!(entry.oid, ObjectId::try_parse(expected_oid.trim()).unwrap());
    assert_eq!(entry.metadata.size, 5);
    assert_eq!(entry.mode.as_u32(), 0o100644);

    let raw = std::fs::read(committed_repository_dir.path().join(".git").join("index")).unwrap();
    assert_eq!(
        index.checksum().to_string(),
        common::to_hex(&raw[raw.len() - 20..])
    );
}

#[rstest]
fn tree_cache_root_covers_every_entry(committed_repository_dir: TempDir) {
    let index = load_git_index(&committed_repository_dir);
    let tree = index.cached_tree().expect("git commit writes a cached tree");

    let root = tree.root().unwrap();
    assert_eq!(root.entry_count, index.len() as i32);
    let head_tree = git_stdout(committed_repository_dir.path(), &["rev-parse", "HEAD^{tree}"]);
    assert_eq!(root.oid(), Some(&ObjectId::try_parse(head_tree.trim()).unwrap()));

    let nested = tree.find(b"a/b").expect("a/b is cached");
    assert_eq!(nested.entry_count, 1);
    let nested_tree = git_stdout(committed_repository_dir.path(), &["rev-parse", "HEAD:a/b"]);
    assert_eq!(nested.oid(), Some(&ObjectId::try_parse(nested_tree.trim()).unwrap()));
}

#[rstest]
fn resolved_conflict_is_kept_in_resolve_undo(repository_dir: TempDir) {
    let dir = repository_dir.path();
    let conflict = FileSpec::new(dir.join("conflict.txt"), "base\n".to_string());

    run_git_command(dir, &["init", "--quiet"]).assert().success();
    write_file(conflict.clone());
    run_git_command(dir, &["add", "conflict.txt"]).assert().success();
    git_commit(dir, "base").assert().success();

    run_git_command(dir, &["checkout", "--quiet", "-b", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(conflict.path.clone(), "feature\n".to_string()));
    git_commit(dir, "feature").arg("-a").assert().success();

    run_git_command(dir, &["checkout", "--quiet", "main"])
        .assert()
        .success();
    write_file(FileSpec::new(conflict.path.clone(), "main\n".to_string()));
    git_commit(dir, "main").arg("-a").assert().success();

    run_git_command(dir, &["merge", "feature"]).assert().failure();

    let index = load_git_index(&repository_dir);
    assert!(index.has_conflicts());
    let stages = index
        .entries_for(b"conflict.txt")
        .iter()
        .map(|entry| entry.stage())
        .collect::<Vec<_>>();
    assert_eq!(stages, vec![Stage::Base, Stage::Ours, Stage::Theirs]);
    let conflicted = index.entries_for(b"conflict.txt").to_vec();

    run_dircache_command(dir, &["ls-files", "--stage"])
        .assert()
        .success()
        .stdout(git_stdout(dir, &["ls-files", "--stage"]));

    write_file(FileSpec::new(conflict.path.clone(), "resolved\n".to_string()));
    run_git_command(dir, &["add", "conflict.txt"]).assert().success();

    let index = load_git_index(&repository_dir);
    assert!(!index.has_conflicts());
    let undo = index
        .resolve_undo()
        .and_then(|undo| undo.find(b"conflict.txt"))
        .expect("resolving records the conflict");
    for entry in &conflicted {
        let saved = undo.stage(entry.stage()).unwrap();
        assert_eq!(saved.oid, entry.oid);
        assert_eq!(saved.mode, entry.mode);
    }
    assert!(index.extension(Signature::RESOLVE_UNDO).is_some());
}

#[rstest]
fn verify_reports_the_trailing_checksum(committed_repository_dir: TempDir) {
    let raw = std::fs::read(committed_repository_dir.path().join(".git").join("index")).unwrap();
    let checksum = common::to_hex(&raw[raw.len() - 20..]);

    run_dircache_command(committed_repository_dir.path(), &["verify"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("ok {checksum}")));
}

#[rstest]
fn tampered_git_index_is_rejected(committed_repository_dir: TempDir) {
    let path = committed_repository_dir.path().join(".git").join("index");
    let mut raw = std::fs::read(&path).unwrap();
    let middle = raw.len() / 2;
    raw[middle] ^= 0x20;
    std::fs::write(&path, raw).unwrap();

    run_dircache_command(committed_repository_dir.path(), &["verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index checksum mismatch"));
}

#[rstest]
fn show_dumps_every_section_to_a_file(committed_repository_dir: TempDir) {
    let dump = committed_repository_dir.path().join("index.txt");

    run_dircache_command(
        committed_repository_dir.path(),
        &["show", "--output", dump.to_str().unwrap()],
    )
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&dump).unwrap();
    let index = load_git_index(&committed_repository_dir);
    assert_eq!(content, index.to_lines().join("\n") + "\n");
    assert!(content.contains("[extensions]\n  TREE (cached tree):"));
    assert!(content.contains("\n  a/b/3.txt\n    stage: 0\n"));
}
