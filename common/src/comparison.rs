//! ルック比較の選択状態
//!
//! 最大2件のスライディングウィンドウ。3件目を選ぶと古い方が外れる。

use crate::error::{Error, Result};
use crate::looks::LookStore;
use crate::types::{LookRecord, MAX_SCORE};
use serde::{Deserialize, Serialize};

/// 同時に選択できる件数
pub const SELECTION_LIMIT: usize = 2;

/// 比較の評価項目と、ルックのスコアからのオフセット
const CRITERIA: &[(&str, i16)] = &[
    ("カラーハーモニー", -4),
    ("シーンへの適合", 0),
    ("アクセサリー", -6),
    ("シルエット", 2),
    ("シューズ", -2),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonSelector {
    selected: Vec<u32>,
}

impl ComparisonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択を切り替える
    ///
    /// - 選択済み → 外す
    /// - 2件未満 → 末尾に追加
    /// - 2件選択済み → 先に選んだ方を外して追加
    pub fn toggle(&mut self, id: u32) {
        if let Some(pos) = self.selected.iter().position(|&s| s == id) {
            self.selected.remove(pos);
        } else if self.selected.len() < SELECTION_LIMIT {
            self.selected.push(id);
        } else {
            self.selected.remove(0);
            self.selected.push(id);
        }
    }

    /// ID数で判定する（ストアに存在するかは問わない）
    pub fn can_compare(&self) -> bool {
        self.selected.len() == SELECTION_LIMIT
    }

    pub fn selected(&self) -> &[u32] {
        &self.selected
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selected.contains(&id)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// 選択順にルックを解決する。見つからないIDは除外
    pub fn resolve<'a>(&self, store: &'a LookStore) -> Vec<&'a LookRecord> {
        self.selected.iter().filter_map(|&id| store.find_by_id(id)).collect()
    }

    pub fn compare(&self, store: &LookStore) -> Result<Comparison> {
        if !self.can_compare() {
            return Err(Error::InvalidState(format!(
                "比較には{}件の選択が必要です（現在{}件）",
                SELECTION_LIMIT,
                self.selected.len()
            )));
        }

        match self.resolve(store).as_slice() {
            [look1, look2] => Ok(Comparison::new((*look1).clone(), (*look2).clone())),
            resolved => Err(Error::InvalidState(format!(
                "選択中のルックが履歴に見つかりません（{}/{}件解決）",
                resolved.len(),
                SELECTION_LIMIT
            ))),
        }
    }
}

/// 項目別スコア
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub name: String,
    pub score1: u8,
    pub score2: u8,
}

impl CriterionScore {
    pub fn diff(&self) -> i16 {
        self.score2 as i16 - self.score1 as i16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    FirstBetter,
    SecondBetter,
    Even,
}

/// 2件のルックの比較結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub look1: LookRecord,
    pub look2: LookRecord,
    /// look2 - look1
    pub score_diff: i16,
    pub criteria: Vec<CriterionScore>,
}

impl Comparison {
    pub fn new(look1: LookRecord, look2: LookRecord) -> Self {
        let criteria = CRITERIA
            .iter()
            .map(|&(name, offset)| CriterionScore {
                name: name.to_string(),
                score1: offset_score(look1.score, offset),
                score2: offset_score(look2.score, offset),
            })
            .collect();

        Self {
            score_diff: look2.score as i16 - look1.score as i16,
            look1,
            look2,
            criteria,
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self.score_diff {
            d if d > 0 => Verdict::SecondBetter,
            d if d < 0 => Verdict::FirstBetter,
            _ => Verdict::Even,
        }
    }

    /// 判定に応じたアドバイス文
    pub fn recommendation(&self) -> String {
        match self.verdict() {
            Verdict::SecondBetter => format!(
                "2つ目のルックの方が「{}」スタイルに合っています。アクセサリーと配色に注目しましょう。",
                self.look2.style
            ),
            Verdict::FirstBetter => {
                "1つ目のルックの方がまとまりがあります。うまくいった要素を次のコーデにも取り入れましょう。"
                    .to_string()
            }
            Verdict::Even => "どちらも同じくらい良いルックです。シーンに合う方を選びましょう。".to_string(),
        }
    }
}

fn offset_score(score: u8, offset: i16) -> u8 {
    (score as i16 + offset).clamp(0, MAX_SCORE as i16) as u8
}
