#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  AppendToDraft(char),
  CancelDelete,
  ConfirmDelete,
  DeleteFromDraft,
  HideHelp,
  NextPost,
  None,
  PreviousPost,
  Quit,
  Reload,
  RequestDelete,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  StartCompose,
  StopCompose,
  SubmitDraft,
}
