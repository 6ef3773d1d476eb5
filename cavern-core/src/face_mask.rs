use std::fmt;
use std::ops::{BitOr, BitOrAssign};

//
// ──────────────────────────────────────────────────────────────
//   Cube faces
//
//   Index order matches the usual cubemap layer order:
//     0 +X right, 1 -X left, 2 +Y top, 3 -Y bottom,
//     4 +Z front, 5 -Z back
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace
{
  PositiveX = 0,
  NegativeX = 1,
  PositiveY = 2,
  NegativeY = 3,
  PositiveZ = 4,
  NegativeZ = 5,
}

impl CubeFace
{
  pub const ALL: [CubeFace; 6] = [
    CubeFace::PositiveX,
    CubeFace::NegativeX,
    CubeFace::PositiveY,
    CubeFace::NegativeY,
    CubeFace::PositiveZ,
    CubeFace::NegativeZ,
  ];

  pub fn index(self) -> usize
  {
    self as usize
  }

  pub fn label(self) -> &'static str
  {
    match self
    {
      CubeFace::PositiveX => "+X",
      CubeFace::NegativeX => "-X",
      CubeFace::PositiveY => "+Y",
      CubeFace::NegativeY => "-Y",
      CubeFace::PositiveZ => "+Z",
      CubeFace::NegativeZ => "-Z",
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   FaceMask: 6-bit set of cube faces
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceMask(u8);

impl FaceMask
{
  pub const EMPTY: FaceMask = FaceMask(0);

  pub const RIGHT: FaceMask = FaceMask(1 << CubeFace::PositiveX as u8);
  pub const LEFT: FaceMask = FaceMask(1 << CubeFace::NegativeX as u8);
  pub const TOP: FaceMask = FaceMask(1 << CubeFace::PositiveY as u8);
  pub const BOTTOM: FaceMask = FaceMask(1 << CubeFace::NegativeY as u8);
  pub const FRONT: FaceMask = FaceMask(1 << CubeFace::PositiveZ as u8);
  pub const BACK: FaceMask = FaceMask(1 << CubeFace::NegativeZ as u8);

  pub const ALL: FaceMask = FaceMask(0b11_1111);

  pub fn from_bits(bits: u8) -> Self
  {
    Self(bits & Self::ALL.0)
  }

  pub fn bits(self) -> u8
  {
    self.0
  }

  pub fn from_face(face: CubeFace) -> Self
  {
    Self(1 << face as u8)
  }

  pub fn is_empty(self) -> bool
  {
    self.0 == 0
  }

  pub fn len(self) -> usize
  {
    self.0.count_ones() as usize
  }

  pub fn contains(self, other: FaceMask) -> bool
  {
    self.0 & other.0 == other.0
  }

  pub fn has_face(self, face: CubeFace) -> bool
  {
    self.contains(Self::from_face(face))
  }

  pub fn insert(&mut self, other: FaceMask)
  {
    self.0 |= other.0;
  }

  pub fn union(self, other: FaceMask) -> Self
  {
    Self(self.0 | other.0)
  }

  /// `other` when `cond` holds, otherwise nothing.
  pub fn when(cond: bool, other: FaceMask) -> Self
  {
    if cond
    {
      other
    }
    else
    {
      Self::EMPTY
    }
  }

  pub fn faces(self) -> impl Iterator<Item = CubeFace>
  {
    CubeFace::ALL.into_iter().filter(move |f| self.has_face(*f))
  }
}

impl BitOr for FaceMask
{
  type Output = FaceMask;

  fn bitor(self, rhs: FaceMask) -> FaceMask
  {
    self.union(rhs)
  }
}

impl BitOrAssign for FaceMask
{
  fn bitor_assign(&mut self, rhs: FaceMask)
  {
    self.insert(rhs);
  }
}

impl From<CubeFace> for FaceMask
{
  fn from(face: CubeFace) -> Self
  {
    Self::from_face(face)
  }
}

impl fmt::Display for FaceMask
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
  {
    if self.is_empty()
    {
      return f.write_str("{}");
    }

    let labels: Vec<&str> = self.faces().map(CubeFace::label).collect();
    write!(f, "{{{}}}", labels.join(" "))
  }
}
