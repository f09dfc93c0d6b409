use super::*;

#[test]
fn base_url_is_trimmed_and_checked() {
    assert_eq!(normalize_base_url("https://sites.example.org/ ").unwrap(), "https://sites.example.org");
    assert!(matches!(normalize_base_url("sites.example.org"), Err(CliError::InvalidBaseUrl(_))));
    assert!(matches!(normalize_base_url("http://"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn export_single_station_with_output() {
    let cli = Cli::try_parse_from(["spectral-cli", "export", "svb", "-o", "out.json"]).unwrap();
    let Command::Export(args) = cli.command else {
        panic!("expected export");
    };
    assert_eq!(args.station.as_deref(), Some("svb"));
    assert_eq!(args.output, Some(PathBuf::from("out.json")));
    assert!(!args.all);
}

#[test]
fn export_all_uses_default_directory() {
    let cli = Cli::try_parse_from(["spectral-cli", "export", "--all"]).unwrap();
    let Command::Export(args) = cli.command else {
        panic!("expected export");
    };
    assert!(args.all);
    assert_eq!(args.output_dir, PathBuf::from("./exports"));
}

#[test]
fn output_file_conflicts_with_all() {
    assert!(Cli::try_parse_from(["spectral-cli", "export", "--all", "-o", "x.json"]).is_err());
}

#[test]
fn station_path_segment_is_encoded() {
    assert_eq!(encode_component("SVB"), "SVB");
    assert_eq!(encode_component("A/B ?"), "A%2FB%20%3F");
    assert_eq!(encode_component("LÖN"), "L%C3%96N");
}

#[test]
fn diff_takes_station_and_file() {
    let cli = Cli::try_parse_from(["spectral-cli", "diff", "svb", "svb_export.json"]).unwrap();
    let Command::Diff(args) = cli.command else {
        panic!("expected diff");
    };
    assert_eq!(args.station, "svb");
    assert_eq!(args.file, PathBuf::from("svb_export.json"));
    assert!(Cli::try_parse_from(["spectral-cli", "diff", "svb"]).is_err());
}

#[test]
fn summary_has_no_arguments() {
    let cli = Cli::try_parse_from(["spectral-cli", "summary"]).unwrap();
    assert!(matches!(cli.command, Command::Summary));
}
