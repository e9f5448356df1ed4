//! PART command handler.

use logos_irc_proto::{Message, MessageRef, normalize_channel};
use tracing::info;

use super::super::{Context, Handler, HandlerError, HandlerResult};

const DEFAULT_REASON: &str = "Leaving";

/// Handler for PART command.
///
/// The PART line goes to every registered member, the leaver included.
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let channel = normalize_channel(target).into_owned();
        let reason = msg
            .trailing(1)
            .unwrap_or_else(|| DEFAULT_REASON.to_string());

        let client = ctx.client()?;
        if !client.is_in(&channel) || !ctx.matrix.channels.contains(&channel) {
            return Err(HandlerError::NotOnChannel(channel));
        }

        let notice = Message::part(&channel, &reason).with_prefix(client.prefix());
        for member in ctx.matrix.registered_members(&channel) {
            member.send(&notice);
        }

        ctx.matrix.part_channel(ctx.id, &channel);
        info!(client = %ctx.id, channel = %channel, reason = %reason, "Left channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::Harness;

    #[test]
    fn everyone_including_leaver_sees_part() {
        let mut h = Harness::new();
        let (a, mut ra) = h.register("alice");
        let (b, mut rb) = h.register("bob");
        h.line(a, "JOIN #x");
        h.line(b, "JOIN #x");
        Harness::drain(&mut ra);
        Harness::drain(&mut rb);

        h.line(a, "PART #x :see you later");
        let expected = vec![":alice!alice@127.0.0.1 PART #x :see you later"];
        assert_eq!(Harness::drain(&mut ra), expected);
        assert_eq!(Harness::drain(&mut rb), expected);
        assert!(!h.matrix.client(a).unwrap().is_in("#x"));
        assert_eq!(h.matrix.channels.member_ids("#x"), vec![b]);
    }

    #[test]
    fn default_reason_and_normalization() {
        let mut h = Harness::new();
        let (a, mut ra) = h.register("alice");
        h.line(a, "JOIN #x");
        Harness::drain(&mut ra);

        h.line(a, "PART x");
        assert_eq!(Harness::drain(&mut ra), vec![":alice!alice@127.0.0.1 PART #x :Leaving"]);
    }

    #[test]
    fn last_member_leaving_deletes_channel() {
        let mut h = Harness::new();
        let (a, _ra) = h.register("alice");
        h.line(a, "JOIN #x");
        h.line(a, "PART #x");
        assert!(!h.matrix.channels.contains("#x"));
    }

    #[test]
    fn home_channel_survives_because_of_the_bot() {
        let mut h = Harness::new();
        let (a, _ra) = h.register("alice");
        h.line(a, "JOIN #general");
        h.line(a, "PART #general");
        assert!(h.matrix.channels.contains("#general"));
    }

    #[test]
    fn non_member_part_is_noop() {
        let mut h = Harness::new();
        let (a, mut ra) = h.register("alice");
        let (b, mut rb) = h.register("bob");
        h.line(b, "JOIN #x");
        Harness::drain(&mut rb);

        h.line(a, "PART #x");
        h.line(a, "PART #nowhere");
        assert!(Harness::drain(&mut ra).is_empty());
        assert!(Harness::drain(&mut rb).is_empty());
        assert_eq!(h.matrix.channels.member_ids("#x"), vec![b]);
    }
}
