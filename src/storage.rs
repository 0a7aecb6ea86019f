use codee::string::JsonSerdeCodec;
use codee::CodecError;
use leptos::prelude::{
    signal, Effect, Get, GetUntracked, LocalStorage, ReadSignal, Set, Signal, UpdateUntracked,
    WriteSignal,
};
use leptos_use::storage::{
    use_storage_with_options, StorageType, UseStorageError, UseStorageOptions,
};

use std::fmt::Debug;

use crate::config::Environment;

pub(crate) struct EnvironmentStorage<Remover>
where
    Remover: Fn() + Clone + Send + Sync,
{
    pub(crate) read: Signal<Environment>,
    pub(crate) write: WriteSignal<Environment>,
    pub(crate) remove: Remover,

    #[expect(unused)]
    decode_err: (ReadSignal<bool>, WriteSignal<bool>),
    #[expect(unused)]
    effect: Effect<LocalStorage>,
}

/// Reactive view of the environment record persisted under `key`.
///
/// Shares the JSON format of [`crate::get_environment`], so both see the same record. Unlike
/// the synchronous accessor, a stored value that cannot be decoded is removed and replaced by
/// `fallback`.
pub(crate) fn use_environment_storage(
    storage_type: StorageType,
    key: &'static str,
    fallback: Environment,
) -> EnvironmentStorage<impl Fn() + Clone + Send + Sync> {
    let (decode_err, set_decode_err) = signal(false);

    let options = UseStorageOptions::default()
        .initial_value(fallback.clone())
        .listen_to_storage_changes(true)
        .delay_during_hydration(false)
        .on_error(move |err| handle_storage_error(&err, key, decode_err, set_decode_err));

    let (read, write, remove) =
        use_storage_with_options::<Environment, JsonSerdeCodec>(storage_type, key, options);

    let remove_clone = remove.clone();
    let effect = Effect::new(move |_| {
        if decode_err.get() {
            replace_undecodable(key, &fallback, &remove_clone, write, set_decode_err);
        }
    });

    EnvironmentStorage {
        read,
        write,
        remove,
        decode_err: (decode_err, set_decode_err),
        effect,
    }
}

/// Logs `err`. A decode error schedules the removal of the stored value instead, once.
fn handle_storage_error<E: Debug, D: Debug>(
    err: &UseStorageError<E, D>,
    key: &str,
    decode_err: ReadSignal<bool>,
    set_decode_err: WriteSignal<bool>,
) {
    match err {
        UseStorageError::ItemCodecError(CodecError::Decode(_)) => {
            // Decode errors may be reported several times before our effect runs.
            if !decode_err.get_untracked() {
                tracing::warn!(?err, "Stored '{key}' is not a valid environment. Scheduling its removal.");
                set_decode_err.set(true);
            }
        }
        _ => tracing::error!(?err, "Error accessing '{key}' in storage."),
    }
}

fn replace_undecodable(
    key: &str,
    fallback: &Environment,
    remove: &impl Fn(),
    write: WriteSignal<Environment>,
    set_decode_err: WriteSignal<bool>,
) {
    tracing::debug!("Replacing undecodable '{key}' with environment {fallback:?}");
    remove();
    write.set(fallback.clone());
    set_decode_err.update_untracked(|it| *it = false);
}
