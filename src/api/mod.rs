//! Backend-facing client: REST endpoints, the two event streams, and the
//! auth seam.

crate::reexport!(auth);
crate::reexport!(client);
crate::reexport!(event);
crate::reexport!(models);
crate::reexport!(stream);
