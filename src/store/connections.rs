use crate::api::Connection;

/// Connection list plus the current selection.
///
/// Invariant: `selected` always references a member of `connections`, or is
/// `None`. Every mutation below preserves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionState {
    pub connections: Vec<Connection>,
    pub selected: Option<String>,
}

impl ConnectionState {
    /// Replace the list; selection moves to the first entry.
    pub fn set_all(&mut self, connections: Vec<Connection>) {
        self.selected = connections.first().map(|c| c.id.clone());
        self.connections = connections;
    }

    /// Select by id. Ignored when the id is not in the list.
    pub fn select(&mut self, id: &str) {
        if self.connections.iter().any(|c| c.id == id) {
            self.selected = Some(id.to_string());
        }
    }

    /// Append a connection; it becomes selected if nothing was.
    pub fn add(&mut self, connection: Connection) {
        if self.selected.is_none() {
            self.selected = Some(connection.id.clone());
        }
        self.connections.push(connection);
    }

    /// Remove by id; a removed selection falls back to the first remaining
    /// entry.
    pub fn remove(&mut self, id: &str) {
        self.connections.retain(|c| c.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = self.connections.first().map(|c| c.id.clone());
        }
    }

    /// The selected connection, when one is set.
    pub fn selected_connection(&self) -> Option<&Connection> {
        let id = self.selected.as_deref()?;
        self.connections.iter().find(|c| c.id == id)
    }
}
