//! Welcome burst and registration completion.

use logos_irc_proto::{Message, Response};
use tracing::info;

use super::super::server_query::send_motd_block;
use crate::state::{ClientId, Matrix};

/// Complete registration if the client has just supplied both NICK and
/// USER, sending the welcome burst exactly once. Returns whether the
/// transition happened.
pub(crate) fn try_register(matrix: &mut Matrix, id: ClientId) -> bool {
    let Some(client) = matrix.client_mut(id) else {
        return false;
    };
    if client.registered || !client.has_identity() {
        return false;
    }
    client.registered = true;
    info!(
        client = %id,
        nick = %client.nick,
        user = %client.user,
        host = %client.host,
        "Client registered"
    );

    send_welcome_burst(matrix, id);
    true
}

/// 001-004 followed by the full MOTD block.
fn send_welcome_burst(matrix: &Matrix, id: ClientId) {
    let Some(client) = matrix.client(id) else {
        return;
    };
    let info = &matrix.server_info;
    let server_name = info.name.as_str();
    let nick = client.nick.as_str();

    let burst = [
        (Response::RPL_WELCOME, format!("{nick} :Welcome to {}", info.network)),
        (Response::RPL_YOURHOST, format!("{nick} :Your host is {server_name}")),
        (
            Response::RPL_CREATED,
            format!("{nick} :This server was created {}", info.created),
        ),
        (
            Response::RPL_MYINFO,
            format!("{nick} {server_name} {} o o", info.version),
        ),
    ];
    for (response, params) in burst {
        client.send(&Message::response(server_name, response, params));
    }

    send_motd_block(server_name, client, &matrix.motd.lines);
}
