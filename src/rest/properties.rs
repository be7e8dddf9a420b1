/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Permission levels that can be requested on the authorize page
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Perms {
    Read,
    Write,
    Delete,
}

/// Size suffixes understood by the static photo server
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Size {
    #[strum(to_string = "s")]
    SmallSquare,
    #[strum(to_string = "q")]
    LargeSquare,
    #[strum(to_string = "t")]
    Thumbnail,
    #[strum(to_string = "m")]
    Small,
    #[strum(to_string = "n")]
    Small320,
    #[strum(to_string = "z")]
    Medium640,
    #[strum(to_string = "c")]
    Medium800,
    #[strum(to_string = "b")]
    Large,
    #[strum(to_string = "h")]
    Large1600,
    #[strum(to_string = "k")]
    Large2048,
}

impl Size {
    /// Token inserted before the file extension
    pub fn suffix(self) -> String {
        let s: &'static str = self.into();
        format!("_{s}")
    }
}
