use std::fs;

use scopa_cli::config::GameConfig;
use scopa_cli::session::run_session;
use scopa_core::collaborators::FirstCardChooser;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path) -> GameConfig {
    let yaml = format!(
        r#"
players: ["Alice", "Bob", "Charlie"]
seed: 4242
rules:
  winning_score: 8
outputs:
  report: "{report}"
"#,
        report = output_dir.join("game.jsonl").display(),
    );

    let mut cfg: GameConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn scripted_game_writes_a_consistent_report() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path());
    let names = config.scripted_names();

    let summary =
        run_session(&config, &names, FirstCardChooser, Vec::new()).expect("game completes");

    let report_path = summary.report_path.clone().expect("report configured");
    let text = fs::read_to_string(&report_path).expect("report readable");
    let rows: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), summary.report_rows);

    let turns = rows.iter().filter(|row| row["event"] == "turn").count();
    let rounds: Vec<&serde_json::Value> =
        rows.iter().filter(|row| row["event"] == "round").collect();
    assert_eq!(rounds.len() as u32, summary.rounds);
    // Three players, 36 cards dealt to hands per round, no skipped turns.
    assert_eq!(turns as u32, 36 * summary.rounds);

    let last_round = rounds.last().expect("at least one round");
    let totals: Vec<u32> = serde_json::from_value(last_round["totals"].clone()).expect("totals");
    assert_eq!(totals, summary.scores);

    let game = rows.last().expect("game row");
    assert_eq!(game["event"], "game");
    assert_eq!(game["seed"], 4242);
    assert_eq!(game["name"], summary.winner.name.as_str());

    // Awards per round never exceed the four rules.
    for round in &rounds {
        let awarded: u32 = serde_json::from_value::<Vec<u32>>(round["board"]["points"].clone())
            .expect("points")
            .iter()
            .sum();
        assert!(awarded <= 4);
    }
}

#[test]
fn yaml_overrides_follow_through_to_the_game() {
    let dir = tempdir().expect("temp dir");
    let mut config = load_config(dir.path());
    config.outputs.report = None;
    config.rules.winning_score = 1;

    let summary = run_session(&config, &config.scripted_names(), FirstCardChooser, Vec::new())
        .expect("game completes");
    assert!(summary.winner.score >= 1);
    assert_eq!(summary.report_rows, 0);
}
