mod gestures;
mod loading;
mod preferences;
mod recovery;
mod source;
mod wake_lock;
