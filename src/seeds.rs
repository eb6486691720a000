//! Built-in phrase bank: enough cards that the app is useful without any
//! external config. Traditional characters, Taiwan usage, Japanese glosses.

use crate::domain::Phrase;

macro_rules! phrase {
  ($id:expr, $cat:expr, $zh:expr, $py:expr, $ja:expr) => {
    Phrase {
      id: $id,
      category: $cat.into(),
      zh: $zh.into(),
      py: $py.into(),
      ja: $ja.into(),
    }
  };
}

pub fn seed_phrases() -> Vec<Phrase> {
  vec![
    phrase!(1, "あいさつ", "你好", "nǐ hǎo", "こんにちは"),
    phrase!(2, "あいさつ", "謝謝", "xiè xie", "ありがとう"),
    phrase!(3, "あいさつ", "不好意思", "bù hǎo yì si", "すみません"),
    phrase!(4, "食事", "我要這個", "wǒ yào zhè ge", "これをください"),
    phrase!(5, "食事", "好吃", "hǎo chī", "おいしい"),
    phrase!(6, "食事", "我不要辣", "wǒ bú yào là", "辛くしないでください"),
    phrase!(7, "食事", "買單", "mǎi dān", "お会計お願いします"),
    phrase!(8, "食事", "內用", "nèi yòng", "店内で食べます"),
    phrase!(9, "買い物", "多少錢？", "duō shǎo qián？", "いくらですか？"),
    phrase!(10, "買い物", "太貴了", "tài guì le", "高すぎます"),
    phrase!(11, "買い物", "便宜一點好嗎？", "pián yí yì diǎn hǎo ma？", "少し安くなりませんか？"),
    phrase!(12, "買い物", "可以刷卡嗎？", "kě yǐ shuā kǎ ma？", "カードは使えますか？"),
    phrase!(13, "移動", "我要去台北車站", "wǒ yào qù tái běi chē zhàn", "台北駅に行きたいです"),
    phrase!(14, "移動", "捷運站在哪裡？", "jié yùn zhàn zài nǎ lǐ？", "MRTの駅はどこですか？"),
    phrase!(15, "移動", "請在這裡停", "qǐng zài zhè lǐ tíng", "ここで停めてください"),
    phrase!(16, "緊急", "我迷路了", "wǒ mí lù le", "道に迷いました"),
    phrase!(17, "緊急", "請幫幫我", "qǐng bāng bāng wǒ", "助けてください"),
    phrase!(18, "緊急", "廁所在哪裡？", "cè suǒ zài nǎ lǐ？", "トイレはどこですか？"),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seed_ids_are_unique_and_cards_complete() {
    let phrases = seed_phrases();
    let mut ids: Vec<u32> = phrases.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), phrases.len());
    for p in &phrases {
      assert!(!p.zh.is_empty() && !p.py.is_empty() && !p.ja.is_empty(), "incomplete card {}", p.id);
      assert!(!p.category.is_empty());
    }
  }
}
