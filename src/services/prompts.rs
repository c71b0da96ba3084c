use crate::domain::types::PromptId;
use crate::dto::prompts::PromptDto;
use crate::repository::{PromptListQuery, PromptReader, PromptWriter};

use super::{ServiceError, ServiceResult};

pub fn list_prompts<R>(query: PromptListQuery, repo: &R) -> ServiceResult<(usize, Vec<PromptDto>)>
where
    R: PromptReader,
{
    match repo.list_prompts(query) {
        Ok((total, prompts)) => Ok((total, prompts.into_iter().map(PromptDto::from).collect())),
        Err(e) => {
            log::error!("Failed to list prompts: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_prompt<R>(id: PromptId, repo: &R) -> ServiceResult<PromptDto>
where
    R: PromptReader,
{
    match repo.get_prompt_by_id(id) {
        Ok(Some(prompt)) => Ok(prompt.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get prompt: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn record_prompt_usage<R>(id: PromptId, repo: &R) -> ServiceResult<bool>
where
    R: PromptReader + PromptWriter,
{
    match repo.get_prompt_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get prompt: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.record_prompt_usage(id) {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to record prompt usage: {e}");
            Ok(false)
        }
    }
}
