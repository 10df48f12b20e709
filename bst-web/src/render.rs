//! HTML fragments for the DDR statistics page
//!
//! Fetching and mapping live in `upstream`; this module only turns rows
//! into markup. The contract the page relies on is one `score-row` per
//! input row, in input order.

use bst_models::StatisticsRow;
use maud::{html, Markup};

const COLUMNS: [&str; 11] = [
    "Level",
    "Song Name",
    "Artist",
    "Mode",
    "Difficulty",
    "Clear Lamp",
    "Rank",
    "Score",
    "Play Count",
    "Clear Count",
    "Max Combo",
];

const MAX_LEVEL: u32 = 19;

const MODE_FILTERS: &[(&str, &str)] = &[("single", "SINGLE"), ("double", "DOUBLE")];

const DIFFICULTY_FILTERS: &[(&str, &str)] = &[
    ("beginner", "BEGINNER"),
    ("basic", "BASIC"),
    ("difficult", "DIFFICULT"),
    ("expert", "EXPERT"),
    ("challenge", "CHALLENGE"),
];

const LAMP_FILTERS: &[(&str, &str)] = &[
    ("fail", "FAIL"),
    ("clear", "CLEAR"),
    ("good", "GOOD FC"),
    ("great", "GREAT FC"),
    ("perfect", "PERFECT FC"),
    ("marvellous", "MARVELLOUS FC"),
    ("unplayed", "NOT PLAYED"),
];

/// Fragment shown in place of the table when the scores could not be loaded
pub fn statistics_error() -> Markup {
    html! { a { "API Error" } }
}

/// The filter panel followed by the score table
pub fn statistics_table(rows: &[StatisticsRow]) -> Markup {
    html! {
        (filter_panel())
        table #stats .display style="width:100%" {
            thead { (header_row()) }
            tbody {
                @for row in rows {
                    tr .score-row {
                        td { (row.level) }
                        td { (row.title) }
                        td { (row.artist) }
                        td { (row.mode) }
                        td { (row.difficulty) }
                        td { (row.lamp) }
                        td { (row.rank) }
                        td { (row.score) }
                        td { (row.play_count) }
                        td { (row.clear_count) }
                        td { (row.max_combo) }
                    }
                }
            }
            tfoot { (header_row()) }
        }
    }
}

fn header_row() -> Markup {
    html! {
        tr {
            @for column in COLUMNS {
                th { (column) }
            }
        }
    }
}

fn filter_panel() -> Markup {
    html! {
        button .btn.btn-primary type="button" data-toggle="collapse"
            data-target="#collapseFilter" aria-expanded="false" aria-controls="collapseFilter" {
            "Filtering"
        }
        div .collapse #collapseFilter {
            div .card.card-body {
                div .container {
                    div .row { "Levels" }
                    @for first in (1..=MAX_LEVEL).step_by(5) {
                        div .row {
                            @for level in first..first + 5 {
                                @if level <= MAX_LEVEL {
                                    div .col.enabled.level-filter id=(format!("level-filter-{}", level)) {
                                        (level)
                                    }
                                } @else {
                                    div .col {}
                                }
                            }
                        }
                    }
                    div .row {
                        div .col {}
                        div .col #level-filter-all-enable { "All" }
                        div .col {}
                        div .col #level-filter-all-disable { "None" }
                        div .col {}
                    }
                }
                (checkbox_filters())
            }
        }
    }
}

fn checkbox_filters() -> Markup {
    let groups = [MODE_FILTERS, DIFFICULTY_FILTERS, LAMP_FILTERS];
    let depth = groups.iter().map(|g| g.len()).max().unwrap_or(0);

    html! {
        table border="0" cellspacing="5" cellpadding="5" {
            thead {
                tr {
                    th { "Mode" }
                    th { "Difficulty" }
                    th { "Lamp" }
                }
            }
            tbody {
                @for i in 0..depth {
                    tr {
                        @for group in groups {
                            td {
                                @if let Some((key, label)) = group.get(i) {
                                    @let id = format!("{}-filter", key);
                                    input type="checkbox" id=(id) name=(id) checked;
                                    " " (label)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
