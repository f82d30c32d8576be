pub trait ResultExt<T, E> {
	/// Logs the error as a warning and drops it. For failures that are
	/// expected now and then, e.g. a malformed record from a peer.
	fn ok_or_warn(self) -> Option<T>
	where
		E: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
	fn ok_or_warn(self) -> Option<T>
	where
		E: std::fmt::Display,
	{
		self.inspect_err(|err| tracing::warn!(%err, "dropped")).ok()
	}
}
