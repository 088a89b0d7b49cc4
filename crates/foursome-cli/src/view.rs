use std::fmt::Write as _;

use foursome_core::{Assignment, PairingLedger, Player, Roster};
use foursome_league::{Archive, PendingTeams, Season};

/// Number of partners listed per player by `stats`.
pub(crate) const TOP_PARTNERS: usize = 5;

pub(crate) fn roster_table(roster: &Roster) -> String {
    let mut out = String::new();
    if roster.is_empty() {
        out.push_str("No players on the roster.\n");
        return out;
    }
    let width = name_width(roster.players().iter());
    writeln!(out, "{:>5}  {:<width$}  {:>8}", "ID", "Name", "Handicap").unwrap();
    for player in roster.sorted_by_handicap() {
        writeln!(
            out,
            "{:>5}  {:<width$}  {:>8.1}",
            player.id, player.name, player.handicap
        )
        .unwrap();
    }
    writeln!(out, "{} player(s)", roster.len()).unwrap();
    out
}

pub(crate) fn assignment(assignment: &Assignment) -> String {
    let mut out = String::new();
    let width = name_width(assignment.players());
    for (i, team) in assignment.teams().iter().enumerate() {
        writeln!(
            out,
            "Team {} (total handicap {:.1})",
            i + 1,
            team.total_handicap()
        )
        .unwrap();
        for member in team.members() {
            writeln!(
                out,
                "  {}  {:<width$}  {:>6.1}",
                member.slot, member.player.name, member.player.handicap
            )
            .unwrap();
        }
    }
    out
}

pub(crate) fn pending(pending: &PendingTeams) -> String {
    let mut out = assignment(&pending.assignment);
    writeln!(
        out,
        "Repeat pairings: {} (seed {})",
        pending.score, pending.seed
    )
    .unwrap();
    out
}

pub(crate) fn history(archive: &Archive) -> String {
    let mut out = String::new();
    if archive.is_empty() {
        out.push_str("No sessions committed yet.\n");
        return out;
    }
    for (i, record) in archive.iter().enumerate() {
        writeln!(
            out,
            "Session {} ({})",
            archive.len() - i,
            record.recorded_at.format("%Y-%m-%d")
        )
        .unwrap();
        for line in assignment(&record.assignment).lines() {
            writeln!(out, "  {line}").unwrap();
        }
    }
    out
}

/// For each roster player, strongest first, the partners they met most often.
///
/// Partners who have left the roster are not listed.
pub(crate) fn partner_stats(roster: &Roster, ledger: &PairingLedger) -> String {
    let mut out = String::new();
    if roster.is_empty() {
        out.push_str("No players on the roster.\n");
        return out;
    }
    for player in roster.sorted_by_handicap() {
        let partners = ledger
            .partners_of(player.id)
            .into_iter()
            .filter_map(|(id, count)| roster.get(id).map(|p| format!("{} x{count}", p.name)))
            .take(TOP_PARTNERS)
            .collect::<Vec<_>>();
        if partners.is_empty() {
            writeln!(out, "{}: no pairings yet", player.name).unwrap();
        } else {
            writeln!(out, "{}: {}", player.name, partners.join(", ")).unwrap();
        }
    }
    out
}

pub(crate) fn seasons(seasons: &[Season], current: Option<&str>) -> String {
    let mut out = String::new();
    if seasons.is_empty() {
        out.push_str("No saved seasons.\n");
        return out;
    }
    for season in seasons {
        let marker = if current == Some(season.name.as_str()) {
            "*"
        } else {
            " "
        };
        writeln!(
            out,
            "{marker} {:>3}  {}  ({} players, {} sessions, saved {})",
            season.id,
            season.name,
            season.roster.len(),
            season.archive.len(),
            season.saved_at.format("%Y-%m-%d")
        )
        .unwrap();
    }
    out
}

fn name_width<'a>(players: impl Iterator<Item = &'a Player>) -> usize {
    players
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4)
}

#[cfg(test)]
mod tests {
    use foursome_core::{PairingLedger, PlayerId, Slot, Team, TeamMember};

    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        for (name, handicap) in [("Ann", 2.0), ("Bob", 9.5), ("Cy", 14.0), ("Dee", 21.3)] {
            roster.add_or_update(name, handicap).unwrap();
        }
        roster
    }

    #[test]
    fn test_assignment_lists_slots_in_order() {
        let roster = roster();
        let team = Team::new(
            roster
                .players()
                .iter()
                .enumerate()
                .map(|(i, p)| TeamMember {
                    player: p.clone(),
                    slot: Slot::from_index(i).unwrap(),
                })
                .collect(),
        );
        let text = assignment(&Assignment::new(vec![team]));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Team 1 (total handicap 46.8)");
        assert!(lines[1].trim_start().starts_with("A  Ann"));
        assert!(lines[4].trim_start().starts_with("D  Dee"));
    }

    #[test]
    fn test_partner_stats_skips_departed_players() {
        let mut roster = roster();
        let team = Team::new(
            roster
                .players()
                .iter()
                .take(3)
                .enumerate()
                .map(|(i, p)| TeamMember {
                    player: p.clone(),
                    slot: Slot::from_index(i).unwrap(),
                })
                .collect(),
        );
        let mut ledger = PairingLedger::new();
        ledger.record(&Assignment::new(vec![team.clone()]));
        ledger.record(&Assignment::new(vec![team]));
        roster.remove(PlayerId(3)).unwrap();

        let text = partner_stats(&roster, &ledger);

        assert!(text.contains("Ann: Bob x2\n"));
        assert!(text.contains("Dee: no pairings yet\n"));
        assert!(!text.contains("Cy"));
    }

    #[test]
    fn test_empty_views() {
        assert_eq!(roster_table(&Roster::new()), "No players on the roster.\n");
        assert_eq!(history(&Archive::new()), "No sessions committed yet.\n");
        assert_eq!(seasons(&[], None), "No saved seasons.\n");
    }
}
