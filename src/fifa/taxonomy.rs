//! Fixed code tables for timeline event types and match periods.
//!
//! Codes come from the FIFA API data contract. A code missing from these
//! tables is an error, never a fallback to `Unknown`.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TaxonomyError {
  #[error("unknown event type code {0}")]
  UnknownEventType(u32),
  #[error("unknown event period code {0}")]
  UnknownPeriod(u32),
}

/// Declares a code table as an enum with lookups in both directions.
macro_rules! code_table {
  (
    $(#[$meta:meta])*
    $name:ident, $error:ident {
      $($variant:ident = $code:literal => $label:literal,)+
    }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum $name {
      $($variant,)+
    }

    impl $name {
      #[allow(dead_code)]
      pub const ALL: &'static [$name] = &[$($name::$variant,)+];

      #[allow(dead_code)]
      pub fn code(self) -> u32 {
        match self {
          $($name::$variant => $code,)+
        }
      }

      pub fn name(self) -> &'static str {
        match self {
          $($name::$variant => $label,)+
        }
      }

      pub fn from_code(code: u32) -> Result<Self, TaxonomyError> {
        match code {
          $($code => Ok($name::$variant),)+
          other => Err(TaxonomyError::$error(other)),
        }
      }

      #[allow(dead_code)]
      pub fn from_name(name: &str) -> Option<Self> {
        match name {
          $($label => Some($name::$variant),)+
          _ => None,
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
      }
    }
  };
}

code_table! {
  /// Phase of the match an event happened in.
  EventPeriod, UnknownPeriod {
    Unknown = 0 => "Unknown",
    Scheduled = 1 => "Scheduled",
    PreMatch = 2 => "PreMatch",
    FirstHalf = 3 => "First_Half",
    HalfTime = 4 => "Half_Time",
    SecondHalf = 5 => "Second_Half",
    ExtraTime = 6 => "Extra_Time",
    ExtraFirstHalf = 7 => "Extra_First_Half",
    ExtraHalfTime = 8 => "Extra_Half_Time",
    ExtraSecondHalf = 9 => "Extra_Second_Half",
    FullTime = 10 => "Full_Time",
    PenaltyShootout = 11 => "Penalty_Shootout",
    PostMatch = 12 => "PostMatch",
    Abandoned = 13 => "Abandoned",
    // Beach soccer
    ThirdHalf = 14 => "Third_Half",
  }
}

code_table! {
  /// Kind of timeline event.
  EventType, UnknownEventType {
    Goal = 0 => "Goal",
    Assist = 1 => "Assist",
    YellowCard = 2 => "YellowCard",
    RedCard = 3 => "RedCard",
    Red2Yellow = 4 => "Red2Yellow",
    Substitution = 5 => "Substitution",
    Penalty = 6 => "Penalty",
    StartTime = 7 => "StartTime",
    EndTime = 8 => "EndTime",
    PauseTime = 9 => "PauseTime",
    ResumeTime = 10 => "ResumeTime",
    Suspension = 11 => "Suspension",
    Shot = 12 => "Shot",
    BigChance = 13 => "BigChance",
    FreeKick = 14 => "FreeKick",
    Offside = 15 => "Offside",
    Corner = 16 => "Corner",
    Save = 17 => "Save",
    Foul = 18 => "Foul",
    TossCoin = 19 => "TossCoin",
    Dribbling = 20 => "Dribbling",
    Skill = 21 => "Skill",
    Tackle = 22 => "Tackle",
    DroppedBall = 23 => "DroppedBall",
    ThrowIn = 24 => "ThrowIn",
    Clearance = 25 => "Clearance",
    EndMatch = 26 => "EndMatch",
    AerialDuel = 27 => "AerialDuel",
    BallOut = 28 => "BallOut",
    Punch = 29 => "Punch",
    Claim = 30 => "Claim",
    TimeOut = 31 => "TimeOut",
    HitBar = 32 => "HitBar",
    HitPost = 33 => "HitPost",
    OwnGoal = 34 => "OwnGoal",
    PenaltyShootOut = 35 => "PenaltyShootOut",
    SecondPenalty = 36 => "SecondPenalty",
    HandBall = 37 => "HandBall",
    Simulation = 38 => "Simulation",
    GoalFromFreeKick = 39 => "GoalFromFreeKick",
    GoalFromIndirectKick = 40 => "GoalFromIndirectKick",
    GoalFromPenalty = 41 => "GoalFromPenalty",
    GoalFromSecondPenalty = 42 => "GoalFromSecondPenalty",
    GoalOverhead = 43 => "GoalOverhead",
    HitBarFromFreeKick = 44 => "HitBarFromFreeKick",
    HitBarFromIndirectKick = 45 => "HitBarFromIndirectKick",
    HitBarFromPenalty = 46 => "HitBarFromPenalty",
    HitBarFromSecondPenalty = 47 => "HitBarFromSecondPenalty",
    HitBarOverhead = 48 => "HitBarOverhead",
    HitPostFromFreeKick = 49 => "HitPostFromFreeKick",
    HitPostFromIndirectKick = 50 => "HitPostFromIndirectKick",
    HitPostFromPenalty = 51 => "HitPostFromPenalty",
    HitPostFromSecondPenalty = 52 => "HitPostFromSecondPenalty",
    HitPostOverhead = 53 => "HitPostOverhead",
    ShotFromIndirectKick = 54 => "ShotFromIndirectKick",
    ShotFromPenalty = 55 => "ShotFromPenalty",
    ShotOverhead = 56 => "ShotOverhead",
    SaveByGoalKeeper = 57 => "SaveByGoalKeeper",
    SaveFromFreeKick = 58 => "SaveFromFreeKick",
    SaveFromIndirectKick = 59 => "SaveFromIndirectKick",
    SaveFromPenalty = 60 => "SaveFromPenalty",
    SaveFromSecondPenalty = 61 => "SaveFromSecondPenalty",
    SaveOverhead = 62 => "SaveOverhead",
    BallOutFromFreeKick = 63 => "BallOutFromFreeKick",
    BallOutFromIndirectKick = 64 => "BallOutFromIndirectKick",
    BallOutFromPenalty = 65 => "BallOutFromPenalty",
    BallOutFromSecondPenalty = 66 => "BallOutFromSecondPenalty",
    BallOutOverhead = 67 => "BallOutOverhead",
    EndTimeWithExtra = 68 => "EndTimeWithExtra",
    EndTimeWithPso = 69 => "EndTimeWithPSO",
    StartMatch = 70 => "StartMatch",
    VarNotification = 71 => "VarNotification",
    FoulCausingPenalty = 72 => "FoulCausingPenalty",
    Unknown = 9999 => "Unknown",
  }
}
