use std::path::Path;

use birthdaybook_cli::{run_cli, Cli};
use birthdaybook_core::CoreConfig;
use clap::Parser;

fn run(db: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["birthdaybook", "--db", db.to_str().unwrap(), "--today", "2024-06-12"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    run_cli(cli, &CoreConfig::default(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn logged_in_db(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let db = dir.path().join("agenda.db");
    run(
        &db,
        &["register", "--name", "Ana", "--email", "ana@example.com", "--password", "pw"],
    )
    .unwrap();
    run(&db, &["login", "--email", "ana@example.com", "--password", "pw"]).unwrap();
    db
}

fn added_id(output: &str) -> String {
    let start = output.rfind('(').unwrap() + 1;
    let end = output.rfind(')').unwrap();
    output[start..end].to_string()
}

#[test]
fn agenda_commands_require_login() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("agenda.db");

    let err = run(&db, &["list"]).unwrap_err();
    assert!(err.to_string().contains("login required"));
    assert_eq!(run(&db, &["whoami"]).unwrap(), "Nenhum usuário logado.\n");
}

#[test]
fn wrong_password_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db = logged_in_db(&dir);
    run(&db, &["logout"]).unwrap();

    let err = run(&db, &["login", "--email", "ana@example.com", "--password", "nope"]).unwrap_err();
    assert!(err.to_string().contains("invalid email or password"));
    assert!(run(&db, &["next"]).is_err());
}

#[test]
fn add_list_edit_remove_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let db = logged_in_db(&dir);
    assert_eq!(run(&db, &["whoami"]).unwrap(), "ana@example.com\n");

    let added = run(
        &db,
        &["add", "--name", "Bruno Lima", "--email", "b@example.com", "--birthdate", "1990-06-15"],
    )
    .unwrap();
    let id = added_id(&added);

    let listed = run(&db, &["list", "--month", "6"]).unwrap();
    assert!(listed.contains("Bruno Lima"));
    assert!(listed.contains("15 de junho • Em 3 dia(s)"));
    assert_eq!(
        run(&db, &["list", "--month", "7"]).unwrap(),
        "Nenhum aniversariante encontrado.\n"
    );

    run(&db, &["edit", id.as_str(), "--name", "Bruno L."]).unwrap();
    assert_eq!(
        run(&db, &["next"]).unwrap(),
        "Próximo: Bruno L. - em 3 dia(s) (15 de junho)\n"
    );

    assert_eq!(run(&db, &["remove", id.as_str()]).unwrap(), "Removido: Bruno L.\n");
    let err = run(&db, &["remove", id.as_str()]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn invalid_birthdate_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let db = logged_in_db(&dir);

    let err = run(
        &db,
        &["add", "--name", "X", "--email", "x@example.com", "--birthdate", "2023-02-30"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("2023-02-30"));
}

#[test]
fn calendar_day_and_today_views() {
    let dir = tempfile::tempdir().unwrap();
    let db = logged_in_db(&dir);
    for (name, birthdate) in [("Carla Dias", "1985-06-12"), ("Davi Rocha", "1970-01-20")] {
        run(
            &db,
            &["add", "--name", name, "--email", "x@example.com", "--birthdate", birthdate],
        )
        .unwrap();
    }

    let calendar = run(&db, &["calendar", "--year", "2024", "--month", "1"]).unwrap();
    let lines = calendar.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "janeiro de 2024");
    assert_eq!(lines[2], "    1  2  3  4  5  6");
    assert!(calendar.contains("20*"));
    assert_eq!(*lines.last().unwrap(), "20: Davi");

    assert_eq!(
        run(&db, &["day", "--year", "2024", "--month", "1", "--day", "20"]).unwrap(),
        "20/1/2024: Davi Rocha (20/01/1970)\n"
    );
    assert_eq!(
        run(&db, &["today"]).unwrap(),
        "Hoje é aniversário de Carla Dias!\n"
    );
}

#[test]
fn theme_toggle_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db = logged_in_db(&dir);

    assert_eq!(run(&db, &["theme"]).unwrap(), "Tema: light\n");
    assert_eq!(run(&db, &["theme", "toggle"]).unwrap(), "Tema: dark\n");
    assert_eq!(run(&db, &["theme", "show"]).unwrap(), "Tema: dark\n");
    assert_eq!(run(&db, &["theme", "light"]).unwrap(), "Tema: light\n");
}
