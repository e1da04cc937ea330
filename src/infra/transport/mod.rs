pub mod http_invite_transport;
