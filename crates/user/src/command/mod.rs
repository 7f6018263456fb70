mod avatar;
mod login;
mod logout;
mod register;
mod set_password;

use std::{
    ops::Deref,
    path::{Path, PathBuf},
};

use foodgram_shared::State;

pub use avatar::AvatarInput;
pub use login::LoginInput;
pub use register::RegisterInput;
pub use set_password::SetPasswordInput;

#[derive(Clone)]
pub struct Command {
    state: State,
    media_root: PathBuf,
}

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: State, media_root: impl Into<PathBuf>) -> Self {
        Self {
            state,
            media_root: media_root.into(),
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }
}
