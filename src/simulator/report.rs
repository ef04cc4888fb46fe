//! Per-run statistics and the aggregated report.

use serde::Serialize;
use std::collections::BTreeMap;

/// What one simulated session achieved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub explorations: u32,
    pub fights: u32,
    pub victories: u32,
    pub defeats: u32,
    pub escapes: u32,
    pub boss_kills: u32,
    pub rounds_fought: u64,
    pub gold_earned: u64,
    pub gold_lost: u64,
    pub loot_drops: u32,
    pub materials_gathered: u32,
    pub quests_completed: u32,
    pub final_level: u32,
    pub final_gold: u32,
    /// Exploration on which the Ancient Dragon fell, if it did.
    pub dragon_slain_at: Option<u32>,
}

impl RunStats {
    pub fn win_rate(&self) -> f64 {
        if self.fights == 0 {
            0.0
        } else {
            self.victories as f64 / self.fights as f64
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub dragon_slayers: u32,
    pub runs_timed_out: u32,

    pub avg_final_level: f64,
    pub avg_final_gold: f64,
    pub avg_fights: f64,
    pub avg_defeats: f64,
    pub avg_win_rate: f64,
    pub avg_rounds_per_fight: f64,
    pub avg_quests_completed: f64,
    pub avg_explorations_to_dragon: f64,

    pub level_distribution: BTreeMap<u32, u32>,
    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let n = runs.len();
        let slayers: Vec<&RunStats> = runs.iter().filter(|r| r.dragon_slain_at.is_some()).collect();
        let total_fights: u64 = runs.iter().map(|r| r.fights as u64).sum();
        let total_rounds: u64 = runs.iter().map(|r| r.rounds_fought).sum();

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            num_runs: n as u32,
            dragon_slayers: slayers.len() as u32,
            runs_timed_out: (n - slayers.len()) as u32,
            avg_final_level: mean(runs.iter().map(|r| r.final_level as f64), n),
            avg_final_gold: mean(runs.iter().map(|r| r.final_gold as f64), n),
            avg_fights: mean(runs.iter().map(|r| r.fights as f64), n),
            avg_defeats: mean(runs.iter().map(|r| r.defeats as f64), n),
            avg_win_rate: mean(runs.iter().map(RunStats::win_rate), n),
            avg_rounds_per_fight: if total_fights == 0 {
                0.0
            } else {
                total_rounds as f64 / total_fights as f64
            },
            avg_quests_completed: mean(runs.iter().map(|r| r.quests_completed as f64), n),
            avg_explorations_to_dragon: mean(
                slayers
                    .iter()
                    .filter_map(|r| r.dragon_slain_at)
                    .map(|at| at as f64),
                slayers.len(),
            ),
            level_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} slew the dragon, {} timed out\n\n",
            self.num_runs, self.dragon_slayers, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Final Gold:      {:.0}\n", self.avg_final_gold));
        report.push_str(&format!("  Avg Quests Done:     {:.1}\n", self.avg_quests_completed));
        if self.dragon_slayers > 0 {
            report.push_str(&format!(
                "  Avg Explores to Dragon: {:.0}\n",
                self.avg_explorations_to_dragon
            ));
        }
        report.push('\n');

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Fights:          {:.0}\n", self.avg_fights));
        report.push_str(&format!("  Avg Defeats:         {:.1}\n", self.avg_defeats));
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.avg_win_rate * 100.0));
        report.push_str(&format!("  Rounds per Fight:    {:.1}\n\n", self.avg_rounds_per_fight));

        report.push_str("── FINAL LEVELS ─────────────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:3}: {:>5.1}% {}\n", level, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        if self.avg_win_rate < 0.7 {
            report.push_str("  ⚠️  Players lose too many fights - enemies too strong?\n");
        }
        if self.dragon_slayers == 0 {
            report.push_str("  ⚠️  Nobody slew the dragon - boss too hard or runs too short?\n");
        }
        if self.avg_rounds_per_fight > 10.0 {
            report.push_str("  ⚠️  Fights drag on - damage too low?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
