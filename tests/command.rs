mod tests {
    use pico_disco::command::{TryReceiveError, TrySendError};
    use pico_disco::config::{CAPTION_CAPACITY, DEFAULT_CAPTION};
    use pico_disco::{CommandChannel, DiscoCommand, caption};

    #[test]
    fn test_commands_are_fifo() {
        let channel = CommandChannel::<4>::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        sender.try_send(DiscoCommand::SetBacklight(0.1)).expect("send");
        sender.stop().expect("send");

        assert_eq!(receiver.try_receive(), Ok(DiscoCommand::SetBacklight(0.1)));
        assert_eq!(receiver.try_receive(), Ok(DiscoCommand::Stop));
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_full_channel_returns_command() {
        let channel = CommandChannel::<2>::new();
        let sender = channel.sender();
        sender.stop().expect("send");
        sender.stop().expect("send");

        let rejected = DiscoCommand::SetCaption(caption("late"));
        assert_eq!(
            sender.try_send(rejected.clone()),
            Err(TrySendError(rejected))
        );
    }

    #[test]
    fn test_default_caption() {
        assert_eq!(caption(DEFAULT_CAPTION).as_str(), "pico disco!");
    }

    #[test]
    fn test_caption_truncates() {
        let long = "a".repeat(CAPTION_CAPACITY + 8);
        assert_eq!(caption(&long).len(), CAPTION_CAPACITY);

        // Two bytes per char, never split in the middle
        let wide = "é".repeat(CAPTION_CAPACITY);
        let truncated = caption(&wide);
        assert_eq!(truncated.len(), CAPTION_CAPACITY);
        assert_eq!(truncated.chars().count(), CAPTION_CAPACITY / 2);
    }
}
