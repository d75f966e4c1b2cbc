use super::*;


fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_checksum() {
    match parse(&["service-loader", "checksum", "/tmp/a.tar.gz"]) {
        CliCommand::Checksum { path } => assert_eq!(path, "/tmp/a.tar.gz"),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["service-loader", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["service-loader", "man"]), CliCommand::Man));
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["service-loader"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn exit_code_distinguishes_mismatch() {
    let mismatch = anyhow::Error::new(LoadError::ChecksumMismatch {
        expected: "a".into(),
        actual: "b".into(),
    });
    assert_eq!(exit_code(&mismatch), EXIT_CHECKSUM_MISMATCH);

    let malformed = anyhow::Error::new(LoadError::MalformedChecksumFile { key: "k".into() });
    assert_eq!(exit_code(&malformed), 1);
    assert_eq!(exit_code(&anyhow::anyhow!("--bucket is required")), 1);
}
