//! Number-recognition quiz sampling.
//!
//! Flow:
//! 1) Build the tier's candidate pool (prices in [100,999]).
//! 2) Draw unique answers without replacement until `count` or the pool runs dry.
//! 3) Per answer, fill a 4-choice set with decoys drawn under the tier's
//!    similarity constraint, then shuffle.
//!
//! The caller supplies the RNG so drills are reproducible under test. Every
//! rejection-sampling loop is guarded by a candidates-remaining check; a
//! constrained sub-pool that runs out yields a shorter result, never a stall.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::collections::HashSet;

pub const DEFAULT_QUIZ_LEN: usize = 7;
const CHOICES_PER_ITEM: usize = 4;

/// Difficulty tier. Controls pool breadth and how much the decoys resemble
/// the answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  Easy,
  Medium,
  Hard,
}

impl Tier {
  pub fn from_param(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "easy" => Some(Tier::Easy),
      "medium" => Some(Tier::Medium),
      "hard" => Some(Tier::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Tier::Easy => "easy",
      Tier::Medium => "medium",
      Tier::Hard => "hard",
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizItem {
  pub answer: u16,
  pub choices: Vec<u16>,
}

/// All numbers a tier may ask about.
///
/// easy: exact hundreds. medium: adds hundred+tens. hard: adds every value
/// with a nonzero units digit.
pub fn candidate_pool(tier: Tier) -> Vec<u16> {
  let mut pool = Vec::new();
  match tier {
    Tier::Easy => {
      for h in 1..=9u16 {
        pool.push(h * 100);
      }
    }
    Tier::Medium => {
      for h in 1..=9u16 {
        pool.push(h * 100);
        for t in 1..10u16 {
          pool.push(h * 100 + t * 10);
        }
      }
    }
    Tier::Hard => {
      for h in 1..=9u16 {
        pool.push(h * 100);
        for t in 0..10u16 {
          for u in 1..10u16 {
            pool.push(h * 100 + t * 10 + u);
          }
        }
      }
      pool.retain(|&n| n <= 999);
    }
  }
  pool
}

/// Draw a quiz set of up to `count` items with pairwise-distinct answers.
///
/// Returns fewer items only when the pool is smaller than `count`.
pub fn generate_quiz_set<R: Rng + ?Sized>(rng: &mut R, tier: Tier, count: usize) -> Vec<QuizItem> {
  let pool = candidate_pool(tier);
  let mut used = HashSet::new();
  let mut items = Vec::new();

  while items.len() < count && used.len() < pool.len() {
    let answer = pool[rng.gen_range(0..pool.len())];
    if !used.insert(answer) {
      continue;
    }

    let mut choices = vec![answer];
    match tier {
      Tier::Easy => fill_choices(rng, &mut choices, &pool),
      Tier::Medium => {
        let answer_hundred = hundred_digit(answer);
        let second_hundred = pick_other(rng, &pool, hundred_digit, answer_hundred);
        let sub_pool: Vec<u16> = pool
          .iter()
          .copied()
          .filter(|&n| {
            let h = hundred_digit(n);
            h == answer_hundred || Some(h) == second_hundred
          })
          .collect();
        fill_choices(rng, &mut choices, &sub_pool);
      }
      Tier::Hard => {
        let answer_hundred = hundred_digit(answer);
        let answer_ten = tens_digit(answer);
        let second_hundred = pick_other(rng, &pool, hundred_digit, answer_hundred);
        let second_ten = pick_other(rng, &pool, tens_digit, answer_ten);
        let sub_pool: Vec<u16> = pool
          .iter()
          .copied()
          .filter(|&n| {
            let h = hundred_digit(n);
            let t = tens_digit(n);
            (h == answer_hundred || Some(h) == second_hundred)
              && (t == answer_ten || Some(t) == second_ten)
          })
          .collect();
        fill_choices(rng, &mut choices, &sub_pool);
      }
    }

    choices.shuffle(rng);
    items.push(QuizItem { answer, choices });
  }

  items
}

fn hundred_digit(n: u16) -> u16 {
  n / 100
}

fn tens_digit(n: u16) -> u16 {
  (n % 100) / 10
}

/// One pool-present digit value other than `own`, uniformly at random.
/// None when the pool offers no alternative; the caller then constrains to
/// `own` alone.
fn pick_other<R: Rng + ?Sized>(
  rng: &mut R,
  pool: &[u16],
  digit: fn(u16) -> u16,
  own: u16,
) -> Option<u16> {
  let mut others: Vec<u16> = pool.iter().map(|&n| digit(n)).collect();
  others.sort_unstable();
  others.dedup();
  others.retain(|&d| d != own);
  others.choose(rng).copied()
}

/// Rejection-sample decoys from `sub_pool` until 4 choices or the sub-pool
/// has no unchosen element left. `choices` must be a subset of `sub_pool`
/// on entry (the answer always is).
fn fill_choices<R: Rng + ?Sized>(rng: &mut R, choices: &mut Vec<u16>, sub_pool: &[u16]) {
  while choices.len() < CHOICES_PER_ITEM && sub_pool.len() > choices.len() {
    let c = sub_pool[rng.gen_range(0..sub_pool.len())];
    if !choices.contains(&c) {
      choices.push(c);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
  }

  #[test]
  fn pool_shapes() {
    let easy = candidate_pool(Tier::Easy);
    let medium = candidate_pool(Tier::Medium);
    let hard = candidate_pool(Tier::Hard);

    assert_eq!(easy.len(), 9);
    assert_eq!(medium.len(), 90);
    assert_eq!(hard.len(), 9 * 91);

    for pool in [&easy, &medium, &hard] {
      assert!(pool.iter().all(|&n| (100..=999).contains(&n)));
      let distinct: HashSet<u16> = pool.iter().copied().collect();
      assert_eq!(distinct.len(), pool.len());
    }

    // medium carries tens but never a nonzero units digit
    assert!(medium.contains(&110));
    assert!(!medium.contains(&115));
    // hard carries units but skips hundred+tens round values
    assert!(hard.contains(&115));
    assert!(hard.contains(&999));
    assert!(!hard.contains(&110));
  }

  #[test]
  fn set_answers_are_unique_pool_members() {
    for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
      let pool: HashSet<u16> = candidate_pool(tier).into_iter().collect();
      let set = generate_quiz_set(&mut rng(1), tier, DEFAULT_QUIZ_LEN);
      assert_eq!(set.len(), DEFAULT_QUIZ_LEN);
      let answers: HashSet<u16> = set.iter().map(|q| q.answer).collect();
      assert_eq!(answers.len(), set.len(), "duplicate answer in {:?}", tier);
      assert!(answers.iter().all(|a| pool.contains(a)));
    }
  }

  #[test]
  fn items_have_four_distinct_choices_with_answer() {
    for seed in 0..20 {
      for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
        for item in generate_quiz_set(&mut rng(seed), tier, DEFAULT_QUIZ_LEN) {
          assert_eq!(item.choices.len(), 4, "{:?} seed {}", tier, seed);
          let distinct: HashSet<u16> = item.choices.iter().copied().collect();
          assert_eq!(distinct.len(), 4);
          let hits = item.choices.iter().filter(|&&c| c == item.answer).count();
          assert_eq!(hits, 1);
        }
      }
    }
  }

  #[test]
  fn medium_choices_span_at_most_two_hundreds() {
    for seed in 0..20 {
      for item in generate_quiz_set(&mut rng(seed), Tier::Medium, DEFAULT_QUIZ_LEN) {
        let hundreds: HashSet<u16> = item.choices.iter().map(|&c| c / 100).collect();
        assert!(hundreds.len() <= 2, "seed {} choices {:?}", seed, item.choices);
      }
    }
  }

  #[test]
  fn hard_choices_span_at_most_two_hundreds_and_two_tens() {
    for seed in 0..20 {
      for item in generate_quiz_set(&mut rng(seed), Tier::Hard, DEFAULT_QUIZ_LEN) {
        let hundreds: HashSet<u16> = item.choices.iter().map(|&c| c / 100).collect();
        let tens: HashSet<u16> = item.choices.iter().map(|&c| (c % 100) / 10).collect();
        assert!(hundreds.len() <= 2, "seed {} choices {:?}", seed, item.choices);
        assert!(tens.len() <= 2, "seed {} choices {:?}", seed, item.choices);
      }
    }
  }

  #[test]
  fn overlong_request_stops_at_pool_exhaustion() {
    let set = generate_quiz_set(&mut rng(3), Tier::Easy, 20);
    assert_eq!(set.len(), 9);
    let answers: HashSet<u16> = set.iter().map(|q| q.answer).collect();
    let pool: HashSet<u16> = candidate_pool(Tier::Easy).into_iter().collect();
    assert_eq!(answers, pool);
  }

  #[test]
  fn fixed_seed_reproduces_the_same_set() {
    for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
      let a = generate_quiz_set(&mut rng(42), tier, 5);
      let b = generate_quiz_set(&mut rng(42), tier, 5);
      assert_eq!(a, b);
    }
  }

  #[test]
  fn choices_come_from_the_tier_pool() {
    for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
      let pool: HashSet<u16> = candidate_pool(tier).into_iter().collect();
      for item in generate_quiz_set(&mut rng(7), tier, DEFAULT_QUIZ_LEN) {
        assert!(item.choices.iter().all(|c| pool.contains(c)));
      }
    }
  }

  #[test]
  fn tier_params_round_trip() {
    assert_eq!(Tier::from_param("easy"), Some(Tier::Easy));
    assert_eq!(Tier::from_param(" Medium "), Some(Tier::Medium));
    assert_eq!(Tier::from_param("HARD"), Some(Tier::Hard));
    assert_eq!(Tier::from_param("expert"), None);
    assert_eq!(Tier::Medium.as_str(), "medium");
  }
}
