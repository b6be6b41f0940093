/*!

This is the long-form manual for `survey_aggregates` and `surveycharts`.

## Input formats

The following formats are supported by `surveycharts`:
* `csv` Comma Separated Values, with the questions in the first row
* `xlsx` Excel workbooks, as exported by Google Forms or Microsoft Forms

In both cases, the first row holds the text of the questions, and each following row
is one respondent. Rows may be shorter than the header: the missing answers are
treated as blank.

## The charts

### Donut: CGPA distribution

One slice per distinct answer to `What is your CGPA?`. Answers are trimmed but not
otherwise normalized, so `3.00 - 3.49` and `3.00-3.49` are two different slices.
Blank answers are left out.

### Chord diagram: co-occurrence of "yes" answers

The following questions are crossed, in this order:

| index | question                                      |
|-------|-----------------------------------------------|
| 0     | `Marital status`                              |
| 1     | `Do you have Depression?`                     |
| 2     | `Do you have Anxiety?`                        |
| 3     | `Do you have Panic attack?`                   |
| 4     | `Did you seek any specialist for a treatment?`|

An answer counts as "yes" when, after trimming, it equals `yes` in any case. Cell
`(i, j)` holds the number of respondents who answered "yes" to both questions `i`
and `j`; the diagonal holds the number of "yes" answers to a single question.

### Stacked bars: treatment seeking by CGPA

For each of the bins `2.00 - 2.49`, `2.50 - 2.99`, `3.00 - 3.49`, `3.50 - 4.00`,
the number of respondents who answered exactly `Yes` or exactly `No` to
`Did you seek any specialist for a treatment?`. Unlike the chord diagram, the
match is case sensitive: `yes` is not counted. All four bins are always present.

## Unusable answers

Missing, blank or unexpected answers are never an error. They are left out of the
chart they would have contributed to, and the other charts are not affected.

## Configuration

`surveycharts --config my_survey.json` reads a JSON file of the following form. All
the fields are optional.

```json
{
  "inputSettings": {
    "provider": "csv",
    "filePath": "student_mental_health.csv"
  },
  "columns": {
    "cgpa": "What is your CGPA?",
    "treatment": "Did you seek any specialist for a treatment?",
    "yesNoQuestions": ["Marital status", "Do you have Depression?"]
  },
  "cgpaBins": ["2.00 - 2.49", "2.50 - 2.99", "3.00 - 3.49", "3.50 - 4.00"],
  "outputSettings": {
    "outputPath": "summary.json",
    "views": ["donut", "bar"]
  }
}
```

`filePath` is resolved relative to the directory of the configuration file. The
command line flags take precedence over the configuration file.

## Navigation

The charts are shown one at a time. `next` moves from the donut to the chord
diagram, then to the bars, then back to the donut; `previous` goes the other way.
With `surveycharts --view donut --next 1`, the chord diagram is rendered.

*/
