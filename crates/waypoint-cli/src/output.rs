//! Rendering snapshots for people and for machines.

use crate::scheduler::Snapshot;
use waypoint::EntityValueMap;

/// Placeholder for an entity a source did not list.
pub const MISSING: &str = "NA";

/// Fixed-width table: one row per entity, one column per source (sorted).
///
/// With an empty `teams` list every entity in the snapshot is shown.
pub fn render_table(snapshot: &Snapshot, teams: &[String]) -> String {
    let teams = if teams.is_empty() {
        snapshot.entities()
    } else {
        teams.to_vec()
    };

    let mut out = String::new();
    out.push_str(&format!("{:30} ", "Team"));
    for source in snapshot.table.keys() {
        out.push_str(&format!("{source:10} "));
    }
    out.push('\n');
    out.push_str(&"-".repeat(40));
    out.push('\n');

    for team in &teams {
        out.push_str(&format!("{team:30} "));
        for scores in snapshot.table.values() {
            let value = scores.get(team).map(String::as_str).unwrap_or(MISSING);
            out.push_str(&format!("{value:10} "));
        }
        out.push('\n');
    }

    out.push_str("\n\n");
    out
}

/// Every entity of one source, in page order.
pub fn render_source(table: &EntityValueMap) -> String {
    table
        .iter()
        .map(|(entity, value)| format!("{entity:30} {value}\n"))
        .collect()
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Failure;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn snapshot() -> Snapshot {
        let mut paddy = EntityValueMap::new();
        paddy.insert("Germany".into(), "9/2".into());
        paddy.insert("Brazil".into(), "4/1".into());
        let mut hill = EntityValueMap::new();
        hill.insert("Germany".into(), "5/1".into());
        hill.insert("France".into(), "6/1".into());

        let mut table = BTreeMap::new();
        table.insert("WilliamHill".to_string(), hill);
        table.insert("PaddyPower".to_string(), paddy);
        Snapshot {
            taken_at: Utc::now(),
            table,
            failures: vec![Failure {
                source: "SkyBet".into(),
                error: "boom".into(),
                retryable: false,
            }],
        }
    }

    #[test]
    fn test_table_layout() {
        let teams = vec!["Germany".to_string(), "France".to_string()];
        let rendered = render_table(&snapshot(), &teams);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], format!("{:30} {:10} {:10} ", "Team", "PaddyPower", "WilliamHill"));
        assert_eq!(lines[1], "-".repeat(40));
        assert_eq!(lines[2], format!("{:30} {:10} {:10} ", "Germany", "9/2", "5/1"));
        assert_eq!(lines[3], format!("{:30} {:10} {:10} ", "France", "NA", "6/1"));
        assert!(rendered.ends_with("\n\n\n"));
    }

    #[test]
    fn test_empty_team_list_shows_everything_sorted() {
        let rendered = render_table(&snapshot(), &[]);
        let rows: Vec<&str> = rendered
            .lines()
            .skip(2)
            .filter(|l| !l.is_empty())
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(rows, vec!["Brazil", "France", "Germany"]);
    }

    #[test]
    fn test_render_source_keeps_page_order() {
        let snap = snapshot();
        let rendered = render_source(&snap.table["PaddyPower"]);
        assert!(rendered.starts_with("Germany"));
        assert!(rendered.lines().nth(1).unwrap().starts_with("Brazil"));
    }
}
