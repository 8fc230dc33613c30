//! ギャラリーのレイアウト計算

use crate::types::Photo;

/// グリッドの描画形
#[derive(Debug, PartialEq, Eq)]
pub enum GridLayout<'a> {
    /// 写真が1枚もない（プレースホルダ表示）
    Empty,
    /// 2列メイソンリー。左が偶数番目、右が奇数番目
    Columns {
        left: Vec<&'a Photo>,
        right: Vec<&'a Photo>,
    },
}

impl<'a> GridLayout<'a> {
    /// 写真の並びは変えずに列へ振り分ける
    pub fn from_photos(photos: &'a [Photo]) -> Self {
        if photos.is_empty() {
            return GridLayout::Empty;
        }

        let (left, right): (Vec<_>, Vec<_>) = photos
            .iter()
            .enumerate()
            .partition(|(i, _)| i % 2 == 0);

        GridLayout::Columns {
            left: left.into_iter().map(|(_, p)| p).collect(),
            right: right.into_iter().map(|(_, p)| p).collect(),
        }
    }
}

/// ホバー中の写真（最大1枚）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState(Option<String>);

impl HoverState {
    pub fn enter(&mut self, id: &str) {
        self.0 = Some(id.to_string());
    }

    pub fn leave(&mut self) {
        self.0 = None;
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.0.as_deref() == Some(id)
    }

    pub fn current(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::seed_photos;

    #[test]
    fn test_empty_collection_is_placeholder() {
        assert_eq!(GridLayout::from_photos(&[]), GridLayout::Empty);
    }

    #[test]
    fn test_columns_by_index_parity() {
        let photos = seed_photos(0);
        let GridLayout::Columns { left, right } = GridLayout::from_photos(&photos) else {
            panic!("columns expected");
        };
        let left: Vec<&str> = left.iter().map(|p| p.id.as_str()).collect();
        let right: Vec<&str> = right.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(left, vec!["1", "3"]);
        assert_eq!(right, vec!["2", "4"]);
    }

    #[test]
    fn test_single_photo_goes_left() {
        let photos = seed_photos(0)[..1].to_vec();
        let GridLayout::Columns { left, right } = GridLayout::from_photos(&photos) else {
            panic!("columns expected");
        };
        assert_eq!(left.len(), 1);
        assert!(right.is_empty());
    }

    #[test]
    fn test_hover_one_at_a_time() {
        let mut hover = HoverState::default();
        hover.enter("1");
        assert!(hover.is_hovered("1"));

        hover.enter("2");
        assert!(!hover.is_hovered("1"));
        assert!(hover.is_hovered("2"));

        hover.leave();
        assert_eq!(hover.current(), None);
    }
}
