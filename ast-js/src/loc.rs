use serde::Serialize;
use std::cmp::max;
use std::cmp::min;

/// A location within the current source file expressed as half-open UTF-8
/// byte offsets.
///
/// Trees built programmatically (without source text) carry synthetic
/// locations; they are still distinct and ordered, which is all downstream
/// consumers rely on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Loc(pub u32, pub u32);

impl Loc {
  pub fn start(&self) -> u32 {
    self.0
  }

  pub fn end(&self) -> u32 {
    self.1
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> u32 {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extend_covers_both_ranges() {
    let mut loc = Loc(5, 8);
    loc.extend(Loc(2, 6));
    assert_eq!(loc, Loc(2, 8));
    loc.extend(Loc(9, 12));
    assert_eq!(loc, Loc(2, 12));
  }

  #[test]
  fn empty_when_degenerate() {
    assert!(Loc(3, 3).is_empty());
    assert_eq!(Loc(3, 7).len(), 4);
  }
}
