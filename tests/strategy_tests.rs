//! Базовая стратегия и отклонения по true count.

use blackjack_trainer::domain::card::{parse_cards, Card};
use blackjack_trainer::domain::hand::Decision;
use blackjack_trainer::domain::rules::RuleConfig;
use blackjack_trainer::engine::deviations::DeviationGroup;
use blackjack_trainer::engine::strategy::{
    basic_action, basic_action_with, dealer_index, resolve_code, ChartCode, Eligibility,
};
use blackjack_trainer::engine::{find_deviation, DEVIATIONS};

fn act(hand: &str, up: &str, rules: &RuleConfig) -> Decision {
    let cards = parse_cards(hand).unwrap();
    let up: Card = up.parse().unwrap();
    basic_action(&cards, &up, rules, false)
}

fn dev(hand: &str, up: &str, tc: i32, rules: &RuleConfig, split: bool) -> Option<Decision> {
    let cards = parse_cards(hand).unwrap();
    let up: Card = up.parse().unwrap();
    find_deviation(&cards, &up, tc, rules, split).map(|d| d.deviation_action)
}

fn rules() -> RuleConfig {
    RuleConfig::default()
}

//
// Базовая стратегия
//

#[test]
fn sixteen_vs_ten_surrenders_when_allowed() {
    assert_eq!(act("Tc 6d", "Kh", &rules()), Decision::Surrender);

    let no_sur = RuleConfig { surrender_allowed: false, ..rules() };
    assert_eq!(act("Tc 6d", "Kh", &no_sur), Decision::Hit);

    // Три карты — сдаться уже нельзя.
    assert_eq!(act("Tc 4d 2s", "Kh", &rules()), Decision::Hit);
}

#[test]
fn soft_eighteen_doubles_or_stands() {
    assert_eq!(act("Ac 7d", "3h", &rules()), Decision::Double);
    assert_eq!(act("Ac 4d 3s", "3h", &rules()), Decision::Stand);
    assert_eq!(act("Ac 7d", "9h", &rules()), Decision::Hit);
    assert_eq!(act("Ac 7d", "7h", &rules()), Decision::Stand);
}

#[test]
fn pairs() {
    assert_eq!(act("Ac Ad", "Th", &rules()), Decision::Split);
    assert_eq!(act("8c 8d", "Th", &rules()), Decision::Split);
    assert_eq!(act("Tc Kd", "6h", &rules()), Decision::Stand);
    assert_eq!(act("9c 9d", "7h", &rules()), Decision::Stand);
    assert_eq!(act("9c 9d", "8h", &rules()), Decision::Split);
    // 55 играется как жёсткие 10.
    assert_eq!(act("5c 5d", "6h", &rules()), Decision::Double);
    assert_eq!(act("5c 5d", "Th", &rules()), Decision::Hit);
}

#[test]
fn eights_vs_ace_depend_on_rules() {
    // H17 + сдача: сдаться. Без сдачи — сплит.
    assert_eq!(act("8c 8d", "Ah", &rules()), Decision::Surrender);
    let no_sur = RuleConfig { surrender_allowed: false, ..rules() };
    assert_eq!(act("8c 8d", "Ah", &no_sur), Decision::Split);

    let s17 = RuleConfig { dealer_hits_soft17: false, ..rules() };
    assert_eq!(act("8c 8d", "Ah", &s17), Decision::Split);
}

#[test]
fn no_das_drops_small_pair_splits() {
    let no_das = RuleConfig { double_after_split: false, ..rules() };
    assert_eq!(act("4c 4d", "5h", &rules()), Decision::Split);
    assert_eq!(act("4c 4d", "5h", &no_das), Decision::Hit);
    assert_eq!(act("6c 6d", "2h", &no_das), Decision::Hit);
    assert_eq!(act("6c 6d", "3h", &no_das), Decision::Split);
    // 22 без сплита: жёсткие 4 вне таблицы → hit.
    assert_eq!(act("2c 2d", "3h", &no_das), Decision::Hit);
}

#[test]
fn doubled_hand_never_gets_double_again() {
    let cards = parse_cards("6c 5d").unwrap();
    let up: Card = "6h".parse().unwrap();
    let elig = Eligibility { can_double: false, can_surrender: false, can_split: false };
    assert_eq!(basic_action_with(&cards, &up, &rules(), elig), Decision::Hit);
}

#[test]
fn s17_cells_differ_from_h17() {
    let s17 = RuleConfig { dealer_hits_soft17: false, ..rules() };
    assert_eq!(act("6c 5d", "Ah", &rules()), Decision::Double);
    assert_eq!(act("6c 5d", "Ah", &s17), Decision::Hit);
    assert_eq!(act("Tc 7d", "Ah", &rules()), Decision::Surrender);
    assert_eq!(act("Tc 7d", "Ah", &s17), Decision::Stand);
    assert_eq!(act("Ac 7d", "2h", &rules()), Decision::Double);
    assert_eq!(act("Ac 7d", "2h", &s17), Decision::Stand);
}

#[test]
fn conditional_codes_follow_eligibility() {
    let all = Eligibility { can_double: true, can_surrender: true, can_split: true };
    let none = Eligibility { can_double: false, can_surrender: false, can_split: false };
    assert_eq!(resolve_code(ChartCode::DoubleOrStand, all), Decision::Double);
    assert_eq!(resolve_code(ChartCode::DoubleOrStand, none), Decision::Stand);
    assert_eq!(resolve_code(ChartCode::SurrenderOrSplit, none), Decision::Hit);
    assert_eq!(
        resolve_code(ChartCode::SurrenderOrSplit, Eligibility { can_split: true, ..none }),
        Decision::Split
    );
}

#[test]
fn dealer_columns() {
    assert_eq!(dealer_index(&"2c".parse().unwrap()), 0);
    assert_eq!(dealer_index(&"9c".parse().unwrap()), 7);
    assert_eq!(dealer_index(&"Qc".parse().unwrap()), 8);
    assert_eq!(dealer_index(&"Ac".parse().unwrap()), 9);
}

//
// Отклонения
//

#[test]
fn deviation_table_layout() {
    assert_eq!(DEVIATIONS.len(), 21);
    assert!(DEVIATIONS[..4].iter().all(|d| d.group == DeviationGroup::Fab4));
    assert!(DEVIATIONS[4..].iter().all(|d| d.group == DeviationGroup::Illustrious18));
}

#[test]
fn sixteen_vs_ten_stands_at_zero() {
    assert_eq!(dev("Tc 6d", "Kh", 0, &rules(), false), Some(Decision::Stand));
    assert_eq!(dev("Tc 6d", "Kh", 3, &rules(), false), Some(Decision::Stand));
    assert_eq!(dev("Tc 6d", "Kh", -1, &rules(), false), None);
}

#[test]
fn fab4_wins_over_illustrious_on_fifteen() {
    // 15 против 10: сдача с TC 0, стенд с TC 4. Первая строка — Fab 4.
    assert_eq!(dev("Tc 5d", "Kh", 4, &rules(), false), Some(Decision::Surrender));
    let no_sur = RuleConfig { surrender_allowed: false, ..rules() };
    assert_eq!(dev("Tc 5d", "Kh", 4, &no_sur, false), Some(Decision::Stand));
    assert_eq!(dev("Tc 5d", "Kh", 3, &no_sur, false), None);
}

#[test]
fn negative_count_rows() {
    assert_eq!(dev("Tc 2d", "4h", -1, &rules(), false), Some(Decision::Hit));
    assert_eq!(dev("Tc 2d", "4h", 0, &rules(), false), None);
    assert_eq!(dev("Tc 2d", "5h", -1, &rules(), false), None);
    assert_eq!(dev("Tc 2d", "5h", -2, &rules(), false), Some(Decision::Hit));
}

#[test]
fn double_deviations_need_two_cards() {
    assert_eq!(dev("6c 4d", "Th", 4, &rules(), false), Some(Decision::Double));
    assert_eq!(dev("3c 3d 4s", "Th", 4, &rules(), false), None);
    let no_das = RuleConfig { double_after_split: false, ..rules() };
    assert_eq!(dev("6c 4d", "Th", 4, &no_das, true), None);
}

#[test]
fn tens_split_only_on_unsplit_pair() {
    assert_eq!(dev("Tc Kd", "6h", 4, &rules(), false), Some(Decision::Split));
    assert_eq!(dev("Tc Kd", "5h", 4, &rules(), false), None);
    assert_eq!(dev("Tc Kd", "5h", 5, &rules(), false), Some(Decision::Split));
    assert_eq!(dev("Tc Kd", "6h", 6, &rules(), true), None);
}
