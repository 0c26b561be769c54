/// User-invokable actions the provider contributes to the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostAction {
    ConnectToRemote,
    ClearRemoteHistory,
}

impl HostAction {
    pub const ALL: [HostAction; 2] = [HostAction::ConnectToRemote, HostAction::ClearRemoteHistory];

    pub fn id(self) -> &'static str {
        match self {
            HostAction::ConnectToRemote => "electron.remote.connect",
            HostAction::ClearRemoteHistory => "electron.remote.history.clear",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HostAction::ConnectToRemote => "Remote: Connect to a remote Backend",
            HostAction::ClearRemoteHistory => "Remote: Clear remote host history",
        }
    }

    pub fn default_keybinding(self) -> Option<&'static str> {
        match self {
            HostAction::ConnectToRemote => Some("ctrl+alt+r"),
            HostAction::ClearRemoteHistory => None,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}
